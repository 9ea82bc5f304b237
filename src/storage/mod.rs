//! Settings storage
//!
//! An explicit storage capability injected into the components that need it
//! (the extraction engine takes no dependency on it). Holds the API key, the
//! backend URL, the parsed user profile and the last generated message,
//! file-backed as pretty-printed JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::UserProfile;
use crate::error::{ReachError, Result};

/// Everything the tool persists between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    /// API key sent to the backend as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Backend base URL override
    #[serde(default)]
    pub backend_url: Option<String>,

    /// The user's own parsed profile, used as sender context for generation
    #[serde(default)]
    pub user_profile: Option<UserProfile>,

    /// When the user profile was last parsed, RFC 3339
    #[serde(default)]
    pub user_profile_parsed_at: Option<String>,

    /// The most recently generated outreach message
    #[serde(default)]
    pub last_message: Option<String>,
}

/// Storage capability: one load, one save, whole-value semantics
pub trait SettingsStore {
    /// Read the current settings; a store with no saved state yields defaults
    fn load(&self) -> Result<Settings>;

    /// Persist the given settings
    fn save(&mut self, settings: &Settings) -> Result<()>;

    /// The configured API key, if any
    fn api_key(&self) -> Result<Option<String>> {
        Ok(self.load()?.api_key)
    }

    /// Store the API key
    fn set_api_key(&mut self, key: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.api_key = Some(key.to_string());
        self.save(&settings)
    }

    /// Store the parsed user profile together with its parse timestamp
    fn set_user_profile(&mut self, profile: &UserProfile, parsed_at: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.user_profile = Some(profile.clone());
        settings.user_profile_parsed_at = Some(parsed_at.to_string());
        self.save(&settings)
    }

    /// Store the most recently generated message
    fn set_last_message(&mut self, message: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.last_message = Some(message.to_string());
        self.save(&settings)
    }
}

/// JSON-file-backed settings store
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file. The file does not need to
    /// exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the platform's config directory
    pub fn at_default_path() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ReachError::StorageFailed("no config directory on this platform".to_string()))?;
        Ok(Self::new(dir.join("coldreach").join("settings.json")))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| ReachError::StorageFailed(format!("cannot read {}: {}", self.path.display(), e)))?;

        serde_json::from_str(&json)
            .map_err(|e| ReachError::StorageFailed(format!("corrupt settings file {}: {}", self.path.display(), e)))
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReachError::StorageFailed(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| ReachError::StorageFailed(format!("cannot serialize settings: {}", e)))?;

        std::fs::write(&self.path, json)
            .map_err(|e| ReachError::StorageFailed(format!("cannot write {}: {}", self.path.display(), e)))
    }
}

/// In-memory settings store, for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    settings: Settings,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        self.settings = settings.clone();
        Ok(())
    }
}

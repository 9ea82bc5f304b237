//! # coldreach
//!
//! A Rust library and CLI for drafting personalized outreach messages: it opens a profile page
//! in a headless browser via the Chrome DevTools Protocol (CDP), scrapes structured profile data
//! from the rendered DOM with a configuration-driven selector engine, and asks an AI
//! text-generation backend to write the message.
//!
//! ## Features
//!
//! - **Selector-driven extraction**: ordered fallback chains per field tolerate unstable,
//!   A/B-tested markup; a failing selector never aborts an extraction
//! - **Structural disambiguation**: an experience block is detected at runtime as either a
//!   single role or a company grouping several roles, by probing the DOM shape
//! - **Browser session management**: launch or connect to Chrome/Chromium instances
//! - **Tool system**: high-level operations (scrape, generate, parse own profile) behind a
//!   uniform request/response contract
//!
//! ## CLI
//!
//! ```bash
//! # Store the backend API key once
//! coldreach config set-key YOUR_KEY
//!
//! # Parse your own profile so the backend knows who is writing
//! coldreach parse-me
//!
//! # Draft a message for a target profile
//! coldreach generate https://www.linkedin.com/in/jane-doe/ --tone friendly
//! ```
//!
//! ## Library Usage
//!
//! ### Extracting a profile from rendered HTML
//!
//! The extraction engine is pure: it takes page HTML and a selector configuration and cannot
//! fail: missing fields come back as `None`, absent sections as empty lists.
//!
//! ```rust
//! use coldreach::{SelectorConfig, extract_profile};
//!
//! # fn main() -> coldreach::Result<()> {
//! let config = SelectorConfig::bundled()?;
//! let html = "<html><body><main><h1>Jane Doe</h1></main></body></html>";
//!
//! let profile = extract_profile(&config, html, "https://example.com/in/jane", chrono::Utc::now());
//! assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Driving a live browser
//!
//! ```rust,no_run
//! use coldreach::{BrowserSession, LaunchOptions, SelectorConfig, extract_profile};
//!
//! # fn main() -> coldreach::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let config = SelectorConfig::bundled()?;
//!
//! let tab = session.open_profile("https://www.linkedin.com/in/jane-doe/")?;
//! let html = session.main_html(&tab)?;
//! let profile = extract_profile(&config, &html, &session.tab_url(&tab), chrono::Utc::now());
//! session.close_tab(tab);
//!
//! println!("{} experience records", profile.experience.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the tool system
//!
//! ```rust,no_run
//! use coldreach::{BackendClient, BrowserSession, LaunchOptions, SelectorConfig};
//! use coldreach::storage::MemoryStore;
//! use coldreach::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let config = SelectorConfig::bundled()?;
//! let backend = BackendClient::new("http://localhost:8000");
//! let mut store = MemoryStore::new();
//!
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&session, &config, &backend, &mut store);
//!
//! let result = registry.execute("scrape_profile", json!({"url": "jane-doe"}), &mut context)?;
//! println!("{}", serde_json::to_string_pretty(&result.data)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`selectors`]: Selector configuration model, validation and the bundled default
//! - [`extract`]: The structural extraction engine (query layer, field extractor, section
//!   parsers, pipeline)
//! - [`backend`]: AI backend client
//! - [`storage`]: Settings storage capability
//! - [`tools`]: High-level operations (scrape, generate, parse own profile)
//! - [`error`]: Error types and result alias

pub mod backend;
pub mod browser;
pub mod error;
pub mod extract;
pub mod selectors;
pub mod storage;
pub mod tools;

pub use backend::{BackendClient, GenerateRequest, UserProfile};
pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use error::{ReachError, Result};
pub use extract::{EducationRecord, ExperienceRecord, ProfileRecord, extract_profile};
pub use selectors::SelectorConfig;
pub use storage::{FileStore, Settings, SettingsStore};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

//! Selector configuration
//!
//! A declarative, data-only description of where each profile field lives in
//! the page DOM: ordered candidate selector lists per scalar field, plus
//! structural descriptors for the two list-shaped sections (experience and
//! education). The configuration is loaded once, validated, and never
//! mutated during an extraction run.
//!
//! Candidate lists are ordered fallback chains: the target site's markup
//! changes across rollouts and A/B variants, so every lookup degrades
//! through ranked alternatives instead of assuming one fixed shape.

use crate::error::{ReachError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default selector configuration bundled with the crate
const DEFAULT_SELECTORS: &str = include_str!("default_selectors.json");

/// Complete selector configuration for one profile layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectorConfig {
    /// Candidate selectors for the scalar profile fields
    pub fields: FieldSelectors,

    /// Structural descriptor for the experience section
    pub experience: SectionConfig,

    /// Structural descriptor for the education section
    pub education: SectionConfig,
}

/// Ordered candidate selector lists for the scalar fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FieldSelectors {
    #[serde(default)]
    pub name: Vec<String>,

    #[serde(default)]
    pub headline: Vec<String>,

    #[serde(default)]
    pub about: Vec<String>,
}

/// Structural descriptor for a list-shaped profile section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SectionConfig {
    /// Inner element used to locate the enclosing section when the section
    /// itself has no stable selector
    #[serde(default)]
    pub anchor: Option<AnchorSpec>,

    /// Fallback direct selectors for the section container
    #[serde(default)]
    pub container: Vec<String>,

    /// Selectors whose union yields candidate top-level item nodes
    #[serde(default)]
    pub items: Vec<String>,

    /// Selector for the list element treated as authoritative when multiple
    /// matching lists are nested
    #[serde(default)]
    pub top_list: Option<String>,

    /// Nested role grouping descriptor (experience only)
    #[serde(default)]
    pub group: Option<GroupConfig>,

    /// Per-record field selectors for top-level items
    #[serde(default)]
    pub fields: ItemFields,

    /// Per-record field selectors for nested role entries
    #[serde(default)]
    pub role_fields: ItemFields,
}

/// Anchor descriptor: a bare selector string, an explicit selector object,
/// or an element id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnchorSpec {
    /// A selector expression, e.g. `"div#experience"`
    Selector(String),

    /// `{ "selector": "..." }`
    BySelector { selector: String },

    /// `{ "id": "..." }`, resolved as an id selector
    ById { id: String },
}

impl AnchorSpec {
    /// Resolve the descriptor to a single selector string
    pub fn to_selector(&self) -> String {
        match self {
            AnchorSpec::Selector(s) => s.clone(),
            AnchorSpec::BySelector { selector } => selector.clone(),
            AnchorSpec::ById { id } => format!("#{}", id),
        }
    }
}

/// Descriptor for a nested list of per-role entries within a grouped
/// multi-role experience block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupConfig {
    /// Candidate selectors for the nested role list
    #[serde(default)]
    pub role_list: Vec<String>,

    /// Selectors identifying the per-role entries within the role list
    #[serde(default)]
    pub role_items: Vec<String>,

    /// Where the shared company name lives when roles are grouped
    #[serde(default)]
    pub company: Vec<String>,
}

/// Candidate selector lists for the fields of one record.
///
/// One shape serves both sections; lists that do not apply (e.g. `school`
/// for experience) stay empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ItemFields {
    #[serde(default)]
    pub title: Vec<String>,

    #[serde(default)]
    pub company: Vec<String>,

    #[serde(default)]
    pub date: Vec<String>,

    #[serde(default)]
    pub description: Vec<String>,

    #[serde(default)]
    pub school: Vec<String>,

    #[serde(default)]
    pub degree: Vec<String>,
}

impl SelectorConfig {
    /// Load the default configuration bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(DEFAULT_SELECTORS)
    }

    /// Parse and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SelectorConfig = serde_json::from_str(json)
            .map_err(|e| ReachError::InvalidConfig(format!("not a valid selector config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReachError::InvalidConfig(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Check the configuration for structural problems and fail fast with a
    /// diagnostic instead of letting missing pieces surface deep inside the
    /// parsing heuristics.
    ///
    /// Selector expressions themselves are not parsed here: a candidate that
    /// the runtime cannot evaluate is treated as a non-match during
    /// extraction, which is how unsupported query features are tolerated.
    pub fn validate(&self) -> Result<()> {
        if self.fields.name.is_empty() {
            return Err(ReachError::InvalidConfig("fields.name has no selector candidates".to_string()));
        }

        Self::validate_section("experience", &self.experience)?;
        Self::validate_section("education", &self.education)?;

        Self::reject_blank("fields.name", &self.fields.name)?;
        Self::reject_blank("fields.headline", &self.fields.headline)?;
        Self::reject_blank("fields.about", &self.fields.about)?;

        Ok(())
    }

    fn validate_section(label: &str, section: &SectionConfig) -> Result<()> {
        if section.anchor.is_none() && section.container.is_empty() {
            return Err(ReachError::InvalidConfig(format!(
                "{}: needs an anchor or at least one container selector",
                label
            )));
        }

        if section.items.is_empty() {
            return Err(ReachError::InvalidConfig(format!("{}: items has no selector candidates", label)));
        }

        if let Some(group) = &section.group {
            if group.role_list.is_empty() {
                return Err(ReachError::InvalidConfig(format!(
                    "{}: group.role_list has no selector candidates",
                    label
                )));
            }
        }

        Self::reject_blank(&format!("{}.container", label), &section.container)?;
        Self::reject_blank(&format!("{}.items", label), &section.items)?;

        Ok(())
    }

    fn reject_blank(label: &str, candidates: &[String]) -> Result<()> {
        if candidates.iter().any(|c| c.trim().is_empty()) {
            return Err(ReachError::InvalidConfig(format!("{} contains an empty selector", label)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_is_valid() {
        let config = SelectorConfig::bundled().expect("bundled config must parse and validate");
        assert!(!config.fields.name.is_empty());
        assert!(!config.experience.items.is_empty());
        assert!(config.experience.group.is_some());
        assert!(config.education.group.is_none());
    }

    #[test]
    fn test_anchor_spec_forms() {
        let bare: AnchorSpec = serde_json::from_str(r#""section.experience""#).unwrap();
        assert_eq!(bare.to_selector(), "section.experience");

        let by_selector: AnchorSpec = serde_json::from_str(r#"{"selector": "div.anchor"}"#).unwrap();
        assert_eq!(by_selector.to_selector(), "div.anchor");

        let by_id: AnchorSpec = serde_json::from_str(r#"{"id": "experience"}"#).unwrap();
        assert_eq!(by_id.to_selector(), "#experience");
    }

    #[test]
    fn test_missing_name_selectors_rejected() {
        let json = r#"{
            "fields": { "headline": ["h2"] },
            "experience": { "container": ["section.exp"], "items": ["li"] },
            "education": { "container": ["section.edu"], "items": ["li"] }
        }"#;

        let err = SelectorConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("fields.name"));
    }

    #[test]
    fn test_section_without_container_or_anchor_rejected() {
        let json = r#"{
            "fields": { "name": ["h1"] },
            "experience": { "items": ["li"] },
            "education": { "container": ["section.edu"], "items": ["li"] }
        }"#;

        let err = SelectorConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("experience"));
    }

    #[test]
    fn test_blank_selector_rejected() {
        let json = r#"{
            "fields": { "name": ["h1", "  "] },
            "experience": { "container": ["section.exp"], "items": ["li"] },
            "education": { "container": ["section.edu"], "items": ["li"] }
        }"#;

        let err = SelectorConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("empty selector"));
    }

    #[test]
    fn test_group_without_role_list_rejected() {
        let json = r#"{
            "fields": { "name": ["h1"] },
            "experience": {
                "container": ["section.exp"],
                "items": ["li"],
                "group": { "company": ["span.company"] }
            },
            "education": { "container": ["section.edu"], "items": ["li"] }
        }"#;

        let err = SelectorConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("role_list"));
    }

    #[test]
    fn test_config_round_trip() {
        let config = SelectorConfig::bundled().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let reparsed = SelectorConfig::from_json_str(&json).unwrap();
        assert_eq!(config, reparsed);
    }
}

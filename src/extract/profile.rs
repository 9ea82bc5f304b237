//! Profile records and the extraction pipeline
//!
//! Composes the scalar field extractor and the two section parsers into one
//! full-profile record. The pipeline has no failure path: every field is
//! individually nullable and every section may come back empty, so a profile
//! that renders nothing recognizable still produces a (mostly empty) record.

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::extract::education::parse_education;
use crate::extract::experience::parse_experience;
use crate::extract::fields::extract_field;
use crate::selectors::SelectorConfig;

/// One work-experience role.
///
/// A single-role block yields one record; a grouped multi-role block yields
/// one record per nested role, all sharing the same `company`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceRecord {
    /// Trimmed, whitespace-collapsed text of the whole matched node,
    /// independent of whether structured sub-fields were found
    pub raw: String,

    pub title: Option<String>,
    pub company: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// One education entry (flat, never grouped)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationRecord {
    /// Trimmed, whitespace-collapsed text of the whole matched node
    pub raw: String,

    pub school: Option<String>,
    pub degree: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// A scraped profile, serialized as the flat JSON object the backend consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub experience: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,

    /// Address of the page the profile was captured from
    pub url: String,

    /// Capture time, RFC 3339 / ISO 8601
    pub timestamp: String,
}

/// Extract a full profile record from rendered page HTML.
///
/// The caller is responsible for having loaded and validated `config`; this
/// function itself cannot fail: missing fields and absent sections are
/// reported as `None` / empty lists in the returned record.
pub fn extract_profile(
    config: &SelectorConfig,
    html: &str,
    url: &str,
    now: DateTime<Utc>,
) -> ProfileRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let record = ProfileRecord {
        name: extract_field(root, &config.fields.name),
        headline: extract_field(root, &config.fields.headline),
        about: extract_field(root, &config.fields.about),
        experience: parse_experience(root, &config.experience),
        education: parse_education(root, &config.education),
        url: url.to_string(),
        timestamp: now.to_rfc3339(),
    };

    log::debug!(
        "Extracted profile from {}: name={:?}, {} experience records, {} education records",
        url,
        record.name,
        record.experience.len(),
        record.education.len(),
    );

    record
}

//! Configuration-driven profile extraction
//!
//! This module is the structural extraction engine: it turns the rendered
//! HTML of a profile page plus a [`SelectorConfig`](crate::selectors::SelectorConfig)
//! into one [`ProfileRecord`]. It includes:
//! - query: primitive DOM lookups with ordered fallback, union dedup and
//!   normalized text extraction
//! - fields: scalar field extraction (name, headline, about)
//! - experience: the experience parser with single/multi-role disambiguation
//! - education: the flat education parser
//! - profile: record types and the composing pipeline
//!
//! Failures inside the engine are expressed as absence (`None`, empty
//! lists), never as errors: "selectors didn't match" and "section genuinely
//! not present" are indistinguishable and both benign.

pub mod education;
pub mod experience;
pub mod fields;
pub mod profile;
pub mod query;

pub use profile::{EducationRecord, ExperienceRecord, ProfileRecord, extract_profile};

use scraper::ElementRef;

use crate::selectors::SectionConfig;

/// Maximum records emitted per list section, regardless of how many DOM
/// matches exist
pub const MAX_SECTION_ITEMS: usize = 20;

/// Resolve a section's container: anchor resolution first, then the direct
/// container candidate list. `None` means the section is absent from this
/// profile.
pub(crate) fn resolve_section_container<'a>(
    root: ElementRef<'a>,
    config: &SectionConfig,
) -> Option<ElementRef<'a>> {
    config
        .anchor
        .as_ref()
        .and_then(|anchor| query::resolve_anchored_section(root, anchor, &config.container))
        .or_else(|| query::first_match(root, &config.container))
}

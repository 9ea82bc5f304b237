//! Scalar field extraction
//!
//! One value per configured field: the first candidate selector that matches
//! wins, and its normalized text is the field value. A field that no
//! candidate resolves is `None`, an expected outcome rather than an error.

use scraper::ElementRef;

use crate::extract::query::{extract_text, first_match};

/// Extract a single scalar field using its ordered candidate list
pub fn extract_field(root: ElementRef<'_>, candidates: &[String]) -> Option<String> {
    first_match(root, candidates).and_then(extract_text)
}

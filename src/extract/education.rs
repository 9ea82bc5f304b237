//! Education section parser
//!
//! The simpler sibling of the experience parser: same container and item
//! resolution, no role grouping. One flat record per item, capped.

use scraper::ElementRef;

use crate::extract::profile::EducationRecord;
use crate::extract::query::{
    all_matches, extract_text, nearest_ancestor_matching, parse_selector, text_of,
};
use crate::extract::{MAX_SECTION_ITEMS, resolve_section_container};
use crate::selectors::SectionConfig;

/// Parse the education section under `root`. Absent section means empty
/// result.
pub fn parse_education<'a>(root: ElementRef<'a>, config: &SectionConfig) -> Vec<EducationRecord> {
    let Some(container) = resolve_section_container(root, config) else {
        return Vec::new();
    };

    let items = all_matches(container, &config.items);
    if items.is_empty() {
        return Vec::new();
    }

    let top_selector = config.top_list.as_deref().and_then(parse_selector);
    let authoritative = top_selector.as_ref().and_then(|selector| {
        container.select(selector).next().or_else(|| {
            if selector.matches(&container) {
                Some(container)
            } else {
                None
            }
        })
    });

    let mut records = Vec::new();
    for item in items {
        if records.len() >= MAX_SECTION_ITEMS {
            break;
        }

        if let (Some(selector), Some(top)) = (&top_selector, authoritative) {
            match nearest_ancestor_matching(item, selector) {
                Some(nearest) if nearest.id() == top.id() => {}
                _ => continue,
            }
        }

        records.push(EducationRecord {
            raw: extract_text(item).unwrap_or_default(),
            school: text_of(item, &config.fields.school, &[]),
            degree: text_of(item, &config.fields.degree, &[]),
            date: text_of(item, &config.fields.date, &[]),
            description: text_of(item, &config.fields.description, &[]),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;
    use scraper::Html;

    fn education_config() -> SectionConfig {
        let config = SelectorConfig::from_json_str(
            r#"{
                "fields": { "name": ["h1"] },
                "experience": { "container": ["section.experience"], "items": ["li"] },
                "education": {
                    "anchor": { "id": "education" },
                    "container": ["section.education"],
                    "items": ["li.school-entry"],
                    "top_list": "ul.schools",
                    "fields": {
                        "school": ["div.school"],
                        "degree": ["div.degree"],
                        "date": ["div.date"],
                        "description": ["div.desc"]
                    }
                }
            }"#,
        )
        .unwrap();
        config.education
    }

    fn parse(html: &str) -> Vec<EducationRecord> {
        let doc = Html::parse_document(html);
        parse_education(doc.root_element(), &education_config())
    }

    #[test]
    fn test_flat_education_items() {
        let records = parse(
            r#"<html><body><section class="education"><span id="education"></span>
                <ul class="schools">
                    <li class="school-entry">
                        <div class="school">State University</div>
                        <div class="degree">BSc Computer Science</div>
                        <div class="date">2012 - 2016</div>
                    </li>
                    <li class="school-entry">
                        <div class="school">Tech Institute</div>
                        <div class="degree">MSc Distributed Systems</div>
                    </li>
                </ul>
            </section></body></html>"#,
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].school.as_deref(), Some("State University"));
        assert_eq!(records[0].degree.as_deref(), Some("BSc Computer Science"));
        assert_eq!(records[0].date.as_deref(), Some("2012 - 2016"));
        assert_eq!(records[1].school.as_deref(), Some("Tech Institute"));
        assert_eq!(records[1].date, None);
        assert!(records[0].raw.contains("State University"));
    }

    #[test]
    fn test_anchor_resolution_finds_section() {
        // No element matches the direct container candidates; the anchor id
        // still leads to the enclosing section
        let records = parse(
            r#"<html><body><section class="profile-card">
                <div id="education"></div>
                <ul class="schools">
                    <li class="school-entry"><div class="school">State University</div></li>
                </ul>
            </section></body></html>"#,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school.as_deref(), Some("State University"));
    }

    #[test]
    fn test_missing_section_is_empty() {
        let records = parse("<html><body><main><h1>Jane</h1></main></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn test_cap_applies() {
        let items: String = (0..25)
            .map(|i| format!(r#"<li class="school-entry"><div class="school">School {}</div></li>"#, i))
            .collect();
        let html = format!(
            r#"<html><body><section class="education"><span id="education"></span><ul class="schools">{}</ul></section></body></html>"#,
            items
        );

        let records = parse(&html);
        assert_eq!(records.len(), MAX_SECTION_ITEMS);
        assert_eq!(records[19].school.as_deref(), Some("School 19"));
    }

    #[test]
    fn test_nested_list_restricted_to_authoritative() {
        let records = parse(
            r#"<html><body><section class="education"><span id="education"></span>
                <ul class="schools">
                    <li class="school-entry"><div class="school">Outer</div>
                        <ul class="schools">
                            <li class="school-entry"><div class="school">Inner</div></li>
                        </ul>
                    </li>
                </ul>
            </section></body></html>"#,
        );

        // Only the entry whose nearest schools-list ancestor is the outer
        // (authoritative) list survives
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school.as_deref(), Some("Outer"));
    }
}

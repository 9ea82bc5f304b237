//! DOM query layer
//!
//! Primitive lookups over a parsed document: ordered-fallback single-node
//! resolution, order-preserving multi-selector union, normalized text
//! extraction, and anchored section resolution.
//!
//! Every lookup degrades gracefully: a selector expression the runtime
//! cannot parse is treated as a non-match for that candidate only and never
//! aborts an extraction.

use indexmap::IndexSet;
use scraper::{ElementRef, Selector};

use crate::selectors::AnchorSpec;

/// Collapse runs of whitespace to single spaces and trim the ends.
///
/// All text leaving the extraction engine passes through here, so the result
/// is stable under re-normalization.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a selector expression, treating malformed input as a non-match
pub(crate) fn parse_selector(expr: &str) -> Option<Selector> {
    match Selector::parse(expr) {
        Ok(selector) => Some(selector),
        Err(e) => {
            log::debug!("Skipping malformed selector '{}': {}", expr, e);
            None
        }
    }
}

/// Whether `node` is `ancestor` itself or one of its descendants
pub(crate) fn is_within(node: ElementRef<'_>, ancestor: ElementRef<'_>) -> bool {
    node.id() == ancestor.id() || node.ancestors().any(|a| a.id() == ancestor.id())
}

/// Nearest ancestor of `node` matching `selector`
pub(crate) fn nearest_ancestor_matching<'a>(
    node: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}

/// Try each candidate expression in order and return the first element any
/// of them matches under `root`. Later candidates are not consulted once one
/// succeeds.
pub fn first_match<'a>(root: ElementRef<'a>, candidates: &[String]) -> Option<ElementRef<'a>> {
    candidates.iter().find_map(|expr| {
        let selector = parse_selector(expr)?;
        root.select(&selector).next()
    })
}

/// Evaluate every candidate under `root` and union the results, preserving
/// first-seen order and deduplicating by node identity.
pub fn all_matches<'a>(root: ElementRef<'a>, candidates: &[String]) -> Vec<ElementRef<'a>> {
    let mut seen = IndexSet::new();
    let mut nodes = Vec::new();

    for expr in candidates {
        let Some(selector) = parse_selector(expr) else {
            continue;
        };
        for element in root.select(&selector) {
            if seen.insert(element.id()) {
                nodes.push(element);
            }
        }
    }

    nodes
}

/// Normalized inner text of a node, or `None` when nothing is left after
/// normalization
pub fn extract_text(node: ElementRef<'_>) -> Option<String> {
    let text = normalize_text(&node.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}

/// First non-empty normalized text among all candidate matches under `root`,
/// in candidate order then document order, skipping matches that sit inside
/// any node of `exclude`.
pub fn text_of<'a>(
    root: ElementRef<'a>,
    candidates: &[String],
    exclude: &[ElementRef<'a>],
) -> Option<String> {
    for expr in candidates {
        let Some(selector) = parse_selector(expr) else {
            continue;
        };
        for element in root.select(&selector) {
            if exclude.iter().any(|excluded| is_within(element, *excluded)) {
                continue;
            }
            if let Some(text) = extract_text(element) {
                return Some(text);
            }
        }
    }

    None
}

/// Resolve an anchor descriptor to its enclosing section container.
///
/// The anchor is located anywhere under `root`; its nearest `<section>`
/// ancestor wins. When no such ancestor exists, the configured container
/// candidates are probed for a match that contains the anchor. `None` means
/// the section is absent from this document.
pub fn resolve_anchored_section<'a>(
    root: ElementRef<'a>,
    anchor: &AnchorSpec,
    containers: &[String],
) -> Option<ElementRef<'a>> {
    let selector = parse_selector(&anchor.to_selector())?;
    let anchor_el = root.select(&selector).next()?;

    if let Some(section) = anchor_el
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name().eq_ignore_ascii_case("section"))
    {
        return Some(section);
    }

    // No section ancestor: fall back to a direct container that contains the anchor
    for expr in containers {
        let Some(selector) = parse_selector(expr) else {
            continue;
        };
        if let Some(container) = root.select(&selector).find(|c| is_within(anchor_el, *c)) {
            return Some(container);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn candidates(exprs: &[&str]) -> Vec<String> {
        exprs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Jane \n\t Doe  "), "Jane Doe");
        assert_eq!(normalize_text("one  two   three"), "one two three");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_text_idempotent() {
        let inputs = ["Jane Doe", "  a  b ", "", "x\u{a0}y", "tabs\t\tand\nnewlines"];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_first_match_fallback_order() {
        let doc = Html::parse_document("<html><body><h1 class='b'>Jane Doe</h1></body></html>");
        let root = doc.root_element();

        // Only the second candidate matches
        let node = first_match(root, &candidates(&["h1.a", "h1.b"])).expect("h1.b should match");
        assert_eq!(extract_text(node).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_first_match_stops_at_first_success() {
        let doc =
            Html::parse_document("<html><body><h1 class='a'>First</h1><h1 class='b'>Second</h1></body></html>");
        let root = doc.root_element();

        let node = first_match(root, &candidates(&["h1.a", "h1.b"])).unwrap();
        assert_eq!(extract_text(node).as_deref(), Some("First"));
    }

    #[test]
    fn test_first_match_skips_malformed_selector() {
        let doc = Html::parse_document("<html><body><h1>Jane</h1></body></html>");
        let root = doc.root_element();

        let node = first_match(root, &candidates(&["h1:::(", "h1"])).expect("malformed candidate must be skipped");
        assert_eq!(extract_text(node).as_deref(), Some("Jane"));
    }

    #[test]
    fn test_all_matches_dedup_preserves_first_seen_order() {
        let doc = Html::parse_document(
            "<html><body><div class='x y' id='one'>1</div><div class='y' id='two'>2</div></body></html>",
        );
        let root = doc.root_element();

        // #one matches both candidates; it must appear once, at its first position
        let nodes = all_matches(root, &candidates(&["div.x", "div.y"]));
        let ids: Vec<_> = nodes.iter().map(|n| n.value().attr("id").unwrap()).collect();
        assert_eq!(ids, vec!["one", "two"]);
    }

    #[test]
    fn test_extract_text_empty_is_none() {
        let doc = Html::parse_document("<html><body><p>   </p><span>ok</span></body></html>");
        let root = doc.root_element();

        let p = first_match(root, &candidates(&["p"])).unwrap();
        assert_eq!(extract_text(p), None);

        let span = first_match(root, &candidates(&["span"])).unwrap();
        assert_eq!(extract_text(span).as_deref(), Some("ok"));
    }

    #[test]
    fn test_text_of_skips_excluded_subtrees() {
        let doc = Html::parse_document(
            "<html><body><div class='item'>\
                <ul class='roles'><span class='company'>Inner Corp</span></ul>\
                <span class='company'>Acme</span>\
             </div></body></html>",
        );
        let root = doc.root_element();

        let item = first_match(root, &candidates(&["div.item"])).unwrap();
        let roles = first_match(item, &candidates(&["ul.roles"])).unwrap();

        // The first positional match sits inside the excluded list
        let company = text_of(item, &candidates(&["span.company"]), &[roles]);
        assert_eq!(company.as_deref(), Some("Acme"));

        // Without the exclusion the inner match wins
        let company = text_of(item, &candidates(&["span.company"]), &[]);
        assert_eq!(company.as_deref(), Some("Inner Corp"));
    }

    #[test]
    fn test_text_of_candidate_order_beats_document_order() {
        let doc = Html::parse_document(
            "<html><body><span class='first'>early</span><span class='second'>late</span></body></html>",
        );
        let root = doc.root_element();

        let text = text_of(root, &candidates(&["span.second", "span.first"]), &[]);
        assert_eq!(text.as_deref(), Some("late"));
    }

    #[test]
    fn test_resolve_anchored_section_by_ancestor() {
        let doc = Html::parse_document(
            "<html><body><section class='card'><div><div id='experience'></div></div><ul><li>x</li></ul></section></body></html>",
        );
        let root = doc.root_element();

        let anchor = AnchorSpec::ById { id: "experience".to_string() };
        let section = resolve_anchored_section(root, &anchor, &[]).expect("section ancestor expected");
        assert_eq!(section.value().name(), "section");
        assert_eq!(section.value().attr("class"), Some("card"));
    }

    #[test]
    fn test_resolve_anchored_section_container_fallback() {
        let doc = Html::parse_document(
            "<html><body><div class='pane'><span id='education'></span></div><div class='pane'>other</div></body></html>",
        );
        let root = doc.root_element();

        let anchor = AnchorSpec::ById { id: "education".to_string() };
        let container = resolve_anchored_section(root, &anchor, &candidates(&["div.pane"]))
            .expect("container fallback expected");
        assert!(container.inner_html().contains("education"));
    }

    #[test]
    fn test_resolve_anchored_section_absent() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let root = doc.root_element();

        let anchor = AnchorSpec::ById { id: "experience".to_string() };
        assert!(resolve_anchored_section(root, &anchor, &candidates(&["section"])).is_none());
    }

    #[test]
    fn test_nearest_ancestor_matching() {
        let doc = Html::parse_document(
            "<html><body><ul id='outer'><li><ul id='inner'><li id='leaf'>x</li></ul></li></ul></body></html>",
        );
        let root = doc.root_element();

        let leaf = first_match(root, &candidates(&["#leaf"])).unwrap();
        let ul = parse_selector("ul").unwrap();

        let nearest = nearest_ancestor_matching(leaf, &ul).unwrap();
        assert_eq!(nearest.value().attr("id"), Some("inner"));
    }
}

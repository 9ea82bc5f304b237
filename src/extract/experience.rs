//! Experience section parser
//!
//! Extracts an ordered, capped sequence of role records from the experience
//! section, disambiguating two block shapes the page renders with the same
//! top-level markup: a plain single-role entry, and a company block grouping
//! several roles in a nested list. The shape is detectable only by probing
//! the DOM at runtime.

use scraper::{ElementRef, Selector};

use crate::extract::profile::ExperienceRecord;
use crate::extract::query::{
    all_matches, extract_text, first_match, is_within, nearest_ancestor_matching, parse_selector,
    text_of,
};
use crate::extract::{MAX_SECTION_ITEMS, resolve_section_container};
use crate::selectors::{GroupConfig, SectionConfig};

/// Parse the experience section under `root`.
///
/// An absent section (no anchor, no container match) is an empty result, not
/// an error.
pub fn parse_experience<'a>(root: ElementRef<'a>, config: &SectionConfig) -> Vec<ExperienceRecord> {
    let Some(container) = resolve_section_container(root, config) else {
        return Vec::new();
    };

    let items = all_matches(container, &config.items);
    if items.is_empty() {
        return Vec::new();
    }

    let group = config.group.as_ref();
    let role_lists = group
        .map(|g| all_matches(container, &g.role_list))
        .unwrap_or_default();

    let top_selector = config.top_list.as_deref().and_then(parse_selector);
    let authoritative = top_selector
        .as_ref()
        .and_then(|selector| choose_top_list(container, selector, &role_lists));

    let mut records = Vec::new();
    for item in items {
        if records.len() >= MAX_SECTION_ITEMS {
            break;
        }

        // Only items hanging off the authoritative list count as top-level
        if let (Some(selector), Some(top)) = (&top_selector, authoritative) {
            match nearest_ancestor_matching(item, selector) {
                Some(nearest) if nearest.id() == top.id() => {}
                _ => continue,
            }
        }

        // A nested role row must not also be counted as a top-level item
        if inside_any(item, &role_lists) {
            continue;
        }

        let grouped = group.and_then(|g| {
            detect_role_group(item, g, config).map(|(role_list, entries)| (g, role_list, entries))
        });
        match grouped {
            Some((g, role_list, entries)) => {
                emit_grouped(item, role_list, &entries, g, config, &mut records)
            }
            None => records.push(single_role_record(item, config)),
        }
    }

    records.truncate(MAX_SECTION_ITEMS);
    records
}

/// Pick the authoritative top-level list inside the container.
///
/// Matches nested inside a role list are rows of a grouped block, not
/// top-level lists, so matches outside any role list are preferred. Failing
/// that: the first raw match, then the container itself when it matches the
/// selector and is not itself nested in a role list.
fn choose_top_list<'a>(
    container: ElementRef<'a>,
    top_selector: &Selector,
    role_lists: &[ElementRef<'a>],
) -> Option<ElementRef<'a>> {
    let matches: Vec<ElementRef<'a>> = container.select(top_selector).collect();

    if let Some(found) = matches.iter().copied().find(|m| !inside_any(*m, role_lists)) {
        return Some(found);
    }

    if let Some(first) = matches.first() {
        return Some(*first);
    }

    if top_selector.matches(&container) && !inside_any(container, role_lists) {
        return Some(container);
    }

    None
}

/// Whether `node` sits strictly inside any of `ancestors`
fn inside_any(node: ElementRef<'_>, ancestors: &[ElementRef<'_>]) -> bool {
    ancestors
        .iter()
        .any(|ancestor| node.id() != ancestor.id() && is_within(node, *ancestor))
}

/// Probe an item for a grouped multi-role shape.
///
/// Positive structural evidence is required: a nested role list must exist,
/// be non-empty, and its first entry must yield a title under the role-title
/// selectors. Anything less (an empty nested list, a first entry without a
/// title) classifies the item as single-role.
fn detect_role_group<'a>(
    item: ElementRef<'a>,
    group: &GroupConfig,
    config: &SectionConfig,
) -> Option<(ElementRef<'a>, Vec<ElementRef<'a>>)> {
    let role_list = first_match(item, &group.role_list)?;
    let entries = role_entries(role_list, group);

    let first = entries.first()?;
    text_of(*first, &config.role_fields.title, &[])?;

    Some((role_list, entries))
}

/// The per-role entries of a role list: its element children, narrowed by
/// the configured role-item selectors when they match anything
fn role_entries<'a>(role_list: ElementRef<'a>, group: &GroupConfig) -> Vec<ElementRef<'a>> {
    let children: Vec<ElementRef<'a>> = role_list.children().filter_map(ElementRef::wrap).collect();

    let selectors: Vec<Selector> = group
        .role_items
        .iter()
        .filter_map(|expr| parse_selector(expr))
        .collect();
    if selectors.is_empty() {
        return children;
    }

    let filtered: Vec<ElementRef<'a>> = children
        .iter()
        .copied()
        .filter(|child| selectors.iter().any(|s| s.matches(child)))
        .collect();

    if filtered.is_empty() { children } else { filtered }
}

/// Emit one record per nested role, all stamped with the company name drawn
/// from the block outside the role list
fn emit_grouped(
    item: ElementRef<'_>,
    role_list: ElementRef<'_>,
    entries: &[ElementRef<'_>],
    group: &GroupConfig,
    config: &SectionConfig,
    records: &mut Vec<ExperienceRecord>,
) {
    let exclude = [role_list];
    let company = text_of(item, &group.company, &exclude)
        .or_else(|| text_of(item, &config.fields.company, &exclude));

    for entry in entries {
        if records.len() >= MAX_SECTION_ITEMS {
            break;
        }
        records.push(ExperienceRecord {
            raw: extract_text(*entry).unwrap_or_default(),
            title: text_of(*entry, &config.role_fields.title, &[]),
            company: company.clone(),
            date: text_of(*entry, &config.role_fields.date, &[]),
            description: text_of(*entry, &config.role_fields.description, &[]),
        });
    }
}

/// Read a plain single-role item directly with the singular field selectors
fn single_role_record(item: ElementRef<'_>, config: &SectionConfig) -> ExperienceRecord {
    ExperienceRecord {
        raw: extract_text(item).unwrap_or_default(),
        title: text_of(item, &config.fields.title, &[]),
        company: text_of(item, &config.fields.company, &[]),
        date: text_of(item, &config.fields.date, &[]),
        description: text_of(item, &config.fields.description, &[]),
    }
}

//! Extract labeled-shape identifiers, with sanitization and exclusion rules.
//!
//! Interactive floor-plan shapes carry their user-facing identifier on the
//! `id` attribute of `<text>` labels nested inside `<g>` containers.
//! Decorative elements (icons, stair markers, background art) share the
//! same structure, so extraction filters against a configured denylist.

use crate::svg::SvgElement;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tag carrying a user-facing identifier.
const LABEL_TAG: &str = "text";
/// Grouping container tag.
const GROUP_TAG: &str = "g";

/// Denylist of identifiers for decorative or non-interactive elements.
/// An identifier is excluded on an exact match, a prefix match, or a
/// pattern match; the categories are unordered in effect.
#[derive(Debug, Default)]
pub struct ExclusionRules {
    pub exact: HashSet<String>,
    pub prefixes: Vec<String>,
    pub patterns: Vec<Regex>,
}

impl ExclusionRules {
    /// Whether a sanitized identifier should be suppressed.
    pub fn excludes(&self, id: &str) -> bool {
        if self.exact.contains(id) {
            return true;
        }
        if self.prefixes.iter().any(|p| id.starts_with(p.as_str())) {
            return true;
        }
        self.patterns.iter().any(|re| re.is_match(id))
    }
}

/// Process-wide exclusion configuration, loaded once and immutable.
pub static DEFAULT_RULES: LazyLock<ExclusionRules> = LazyLock::new(|| ExclusionRules {
    exact: ["background", "frame"].map(String::from).into(),
    prefixes: vec!["vector_".to_string(), "icon_".to_string()],
    patterns: vec![
        Regex::new(r"^STAIRS").unwrap(),
        Regex::new(r"^ELEVATOR").unwrap(),
    ],
});

/// Strip control and line-separator code points and trim whitespace.
///
/// Removes exactly U+0000–U+001F, U+007F, U+2028, and U+2029. Other
/// invisible characters (zero-width space and friends) are part of the
/// identifier and survive.
pub fn sanitize_id(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}' | '\u{2028}' | '\u{2029}'))
        .collect();
    cleaned.trim().to_string()
}

/// Collect surviving label identifiers in document order.
///
/// Selects every `<text>` nested at any depth inside a `<g>`; elements
/// without an `id` attribute are never candidates. Duplicates are
/// preserved — deduplication is the client's concern.
pub fn extract_gids(root: &SvgElement, rules: &ExclusionRules) -> Vec<String> {
    let mut out = Vec::new();
    walk(root, false, rules, &mut out);
    out
}

fn walk(el: &SvgElement, in_group: bool, rules: &ExclusionRules, out: &mut Vec<String>) {
    if in_group && el.tag == LABEL_TAG {
        if let Some(raw) = el.attr("id") {
            let id = sanitize_id(raw);
            if !rules.excludes(&id) {
                out.push(id);
            }
        }
    }
    let nested = in_group || el.tag == GROUP_TAG;
    for child in &el.children {
        walk(child, nested, rules, out);
    }
}

//! Name canonicalisation and the name-level rejection rules.

use crate::extract::URL_PREFIX;

/// Template artifacts that show up in the name column of several sources.
/// Compared against the normalised name.
pub const PLACEHOLDER_NAMES: &[&str] = &[
    "harry potter",
    "name/title",
    "name of organization",
    "name",
    "[addresses and contact info below each apt]",
];

/// First-column labels that mark a header row in the 5-column tables.
pub const HEADER_LABELS: &[&str] = &["name/title", "name", "name of organization"];

/// Names shorter than this (in characters, after trimming) are junk.
const MIN_NAME_CHARS: usize = 3;

/// Canonicalises a display name into its identity key.
///
/// Lower-cases, trims, and collapses every whitespace run into a single
/// space. Idempotent.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when the key belongs to a template row rather than an organisation.
pub fn is_placeholder(key: &str) -> bool {
    PLACEHOLDER_NAMES.contains(&key)
}

/// True when the first cell of a row is one of the known header labels.
pub fn is_header_label(cell: &str) -> bool {
    let label = cell.trim().to_lowercase();
    HEADER_LABELS.contains(&label.as_str())
}

/// True when a display name is a bare URL or too short to be meaningful.
pub fn is_junk_name(name: &str) -> bool {
    URL_PREFIX.is_match(name) || name.trim().chars().count() < MIN_NAME_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_ignores_case_and_whitespace() {
        assert_eq!(normalize_name("Food  Bank"), normalize_name("food bank"));
        assert_eq!(normalize_name("  ABC\tShelter \n"), "abc shelter");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["  Mixed   CASE\tName ", "already normal", "", "Ünïcode  Ñame"] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn placeholders_match_after_normalization() {
        assert!(is_placeholder(&normalize_name("Name/Title")));
        assert!(is_placeholder(&normalize_name("  Harry   Potter ")));
        assert!(is_placeholder(&normalize_name(
            "[Addresses and contact info below each apt] "
        )));
        assert!(!is_placeholder(&normalize_name("Name Brand Foods")));
    }

    #[test]
    fn header_labels_are_trimmed_and_case_folded() {
        assert!(is_header_label(" Name of Organization "));
        assert!(is_header_label("NAME"));
        assert!(!is_header_label("Named Org"));
    }

    #[test]
    fn junk_names_are_urls_or_too_short() {
        assert!(is_junk_name("http://example.com"));
        assert!(is_junk_name("www.example.org/path"));
        assert!(is_junk_name(" ab "));
        assert!(!is_junk_name("abc"));
        assert!(!is_junk_name("Visit www.example.org"));
    }
}

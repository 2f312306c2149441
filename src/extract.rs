//! Pattern-based extraction of contact details from free-form cells.

use std::sync::LazyLock;

use regex::Regex;

pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

pub static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid url regex"));

/// [`URL`] anchored at the start of the input.
pub static URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://\S+|www\.\S+)").expect("valid url prefix regex"));

pub static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}").expect("valid phone regex")
});

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://").expect("valid scheme regex"));

/// Separator between several matches of the same kind.
const MATCH_SEPARATOR: &str = "; ";

/// Link and email pulled out of one cell. Empty strings mean nothing found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub url: String,
    pub email: String,
}

/// Splits a combined web/email cell into its link and email parts.
///
/// Every non-overlapping match of each pattern is kept. Trailing
/// punctuation is stripped from links. Text that matches neither pattern is
/// returned verbatim as the link so nothing is discarded.
pub fn split_web_email(raw: &str) -> Contact {
    let raw = raw.trim();

    let email = EMAIL
        .find_iter(raw)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(MATCH_SEPARATOR);
    let url = URL
        .find_iter(raw)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ')', '>']))
        .collect::<Vec<_>>()
        .join(MATCH_SEPARATOR);

    if email.is_empty() && url.is_empty() && !raw.is_empty() {
        return Contact {
            url: raw.to_string(),
            email,
        };
    }

    Contact { url, email }
}

pub fn has_phone(text: &str) -> bool {
    PHONE.is_match(text)
}

pub fn has_url(text: &str) -> bool {
    URL.is_match(text)
}

pub fn has_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

/// True when the text carries an explicit `http://` or `https://` scheme.
pub fn has_scheme(text: &str) -> bool {
    SCHEME.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mixed_cell_and_strips_trailing_period() {
        let contact = split_web_email("Contact: jane@x.org or https://x.org/help.");
        assert_eq!(contact.url, "https://x.org/help");
        assert_eq!(contact.email, "jane@x.org");
    }

    #[test]
    fn joins_multiple_matches() {
        let contact = split_web_email("a@b.org, c@d.com www.one.org; (https://two.org)");
        assert_eq!(contact.email, "a@b.org; c@d.com");
        assert_eq!(contact.url, "www.one.org; https://two.org");
    }

    #[test]
    fn unmatched_text_falls_back_to_link() {
        let contact = split_web_email("  see front desk ");
        assert_eq!(contact.url, "see front desk");
        assert_eq!(contact.email, "");
    }

    #[test]
    fn empty_input_yields_empty_pair() {
        assert_eq!(split_web_email("   "), Contact::default());
    }

    #[test]
    fn phone_pattern_accepts_common_layouts() {
        assert!(has_phone("(303) 555-1234"));
        assert!(has_phone("303.555.1234"));
        assert!(has_phone("call 3035551234 today"));
        assert!(!has_phone("555-1234"));
    }
}

//! The record shape shared by every adapter and the store.

use std::collections::BTreeSet;

use crate::normalize::normalize_name;

/// Tag assigned when neither an explicit source nor the keyword table
/// produced one.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Tag shared by every housing source.
pub const HOUSING: &str = "Housing";
/// Tag shared by every employment source.
pub const EMPLOYMENT: &str = "Employment";
pub const WEATHER_SHELTER: &str = "Weather-Shelter";
pub const HOUSING_FELON_FRIENDLY: &str = "Housing-Felon-Friendly";
pub const JOBS_FELON_FRIENDLY: &str = "Jobs-Felon-Friendly";
pub const RURAL: &str = "Rural";
pub const SEX_OFFENDER: &str = "SO";

/// A single resource listing.
///
/// The same shape is used for adapter output (a partial record, where any
/// field may be empty) and for the canonical entry kept in the
/// [`RecordStore`](crate::store::RecordStore). An empty string always means
/// "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    /// Display name with the original casing, trimmed.
    pub name: String,
    pub phone: String,
    pub web_link: String,
    pub email: String,
    pub physical_address: String,
    /// Free text; grows as more sources contribute notes.
    pub details: String,
    /// Tag names. Ordered so the rendered list is stable.
    pub tags: BTreeSet<String>,
}

impl EntityRecord {
    /// Creates an empty record carrying only a trimmed display name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            ..Self::default()
        }
    }

    /// Adds a tag to the record. Existing tags are never removed.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds every tag of the iterator to the record.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Key under which the record is deduplicated.
    pub fn identity_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// True when the only tag is the fallback [`UNCATEGORIZED`] tag.
    pub fn is_uncategorized(&self) -> bool {
        self.tags.len() == 1 && self.tags.contains(UNCATEGORIZED)
    }

    /// Tags rendered the way the output table expects them.
    pub fn tags_display(&self) -> String {
        self.tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name_and_keys_case_insensitively() {
        let record = EntityRecord::new("  Food  Bank ");
        assert_eq!(record.name, "Food  Bank");
        assert_eq!(record.identity_key(), "food bank");
    }

    #[test]
    fn tags_display_is_sorted_and_semicolon_joined() {
        let record = EntityRecord::new("Anything").with_tags(["Medical", "Food", "Housing"]);
        assert_eq!(record.tags_display(), "Food; Housing; Medical");
    }

    #[test]
    fn uncategorized_means_exactly_that_single_tag() {
        let only = EntityRecord::new("x").with_tag(UNCATEGORIZED);
        let mixed = EntityRecord::new("x").with_tags([UNCATEGORIZED, "Food"]);
        assert!(only.is_uncategorized());
        assert!(!mixed.is_uncategorized());
        assert!(!EntityRecord::new("x").is_uncategorized());
    }
}

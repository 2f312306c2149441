//! Identity-keyed record store and the merge policy applied to it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::model::EntityRecord;
use crate::normalize::{is_placeholder, normalize_name};

/// Separator placed between details contributed by different sources.
pub const DETAILS_SEPARATOR: &str = " | ";

/// Where incoming details go relative to the details already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsMerge {
    /// Existing text first, incoming text after.
    Append,
    /// Incoming text first, existing text after.
    Prepend,
}

/// Result of offering a record to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Merged,
    /// Empty or placeholder name; nothing was stored.
    Rejected,
}

/// Folds `incoming` into `existing`.
///
/// Tags are unioned. Each scalar field keeps its current value unless it is
/// empty. Details are combined per `details` unless the incoming text is
/// empty or already contained in the stored text.
pub fn merge(existing: &mut EntityRecord, incoming: EntityRecord, details: DetailsMerge) {
    existing.tags.extend(incoming.tags);

    fill(&mut existing.phone, incoming.phone);
    fill(&mut existing.web_link, incoming.web_link);
    fill(&mut existing.email, incoming.email);
    fill(&mut existing.physical_address, incoming.physical_address);

    combine_details(&mut existing.details, incoming.details, details);
}

fn fill(slot: &mut String, value: String) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value;
    }
}

fn combine_details(existing: &mut String, incoming: String, policy: DetailsMerge) {
    if incoming.is_empty() || existing.contains(incoming.as_str()) {
        return;
    }
    if existing.is_empty() {
        *existing = incoming;
        return;
    }
    *existing = match policy {
        DetailsMerge::Append => format!("{existing}{DETAILS_SEPARATOR}{incoming}"),
        DetailsMerge::Prepend => format!("{incoming}{DETAILS_SEPARATOR}{existing}"),
    };
}

/// Canonical records keyed by [`normalize_name`].
///
/// Exactly one record exists per identity key. The store owns its records;
/// pipeline stages receive it by mutable reference.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<String, EntityRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(&normalize_name(name))
    }

    /// Looks a record up by any spelling of its name.
    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.records.get(&normalize_name(name))
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut EntityRecord> {
        self.records.values_mut()
    }

    /// Creates the record or merges it into the one sharing its identity key.
    pub fn upsert(&mut self, incoming: EntityRecord, details: DetailsMerge) -> Upsert {
        match self.slot(&incoming) {
            Some(Entry::Vacant(slot)) => {
                slot.insert(incoming);
                Upsert::Created
            }
            Some(Entry::Occupied(mut slot)) => {
                merge(slot.get_mut(), incoming, details);
                Upsert::Merged
            }
            None => Upsert::Rejected,
        }
    }

    /// Creates the record if its identity is new, otherwise only adds its
    /// tags to the existing record.
    pub fn insert_or_tag(&mut self, incoming: EntityRecord) -> Upsert {
        match self.slot(&incoming) {
            Some(Entry::Vacant(slot)) => {
                slot.insert(incoming);
                Upsert::Created
            }
            Some(Entry::Occupied(mut slot)) => {
                slot.get_mut().tags.extend(incoming.tags);
                Upsert::Merged
            }
            None => Upsert::Rejected,
        }
    }

    /// Drops every record for which `keep` returns false and returns the
    /// number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&EntityRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|_, record| keep(record));
        before - self.records.len()
    }

    pub fn into_records(self) -> Vec<EntityRecord> {
        self.records.into_values().collect()
    }

    fn slot(&mut self, incoming: &EntityRecord) -> Option<Entry<'_, String, EntityRecord>> {
        let key = incoming.identity_key();
        if key.is_empty() || is_placeholder(&key) {
            debug!(name = %incoming.name, "rejected placeholder name");
            return None;
        }
        Some(self.records.entry(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> EntityRecord {
        EntityRecord::new(name)
    }

    #[test]
    fn tags_are_unioned() {
        let mut existing = record("A").with_tags(["Food", "Housing"]);
        let incoming = record("A").with_tags(["Housing", "Medical"]);
        let before = existing.tags.clone();
        let added = incoming.tags.clone();

        merge(&mut existing, incoming, DetailsMerge::Append);

        assert!(existing.tags.is_superset(&before));
        assert!(existing.tags.is_superset(&added));
        assert_eq!(existing.tags.len(), 3);
    }

    #[test]
    fn scalars_are_first_writer_wins() {
        let mut existing = record("A");
        let mut incoming = record("A");
        incoming.phone = "555-1234".into();
        merge(&mut existing, incoming, DetailsMerge::Append);
        assert_eq!(existing.phone, "555-1234");

        let mut later = record("A");
        later.phone = "999".into();
        later.email = "a@b.org".into();
        merge(&mut existing, later, DetailsMerge::Append);
        assert_eq!(existing.phone, "555-1234");
        assert_eq!(existing.email, "a@b.org");
    }

    #[test]
    fn details_append_or_prepend_with_separator() {
        let mut existing = record("A");
        existing.details = "old".into();
        let mut incoming = record("A");
        incoming.details = "new".into();
        merge(&mut existing, incoming.clone(), DetailsMerge::Append);
        assert_eq!(existing.details, "old | new");

        let mut other = record("A");
        other.details = "old".into();
        merge(&mut other, incoming, DetailsMerge::Prepend);
        assert_eq!(other.details, "new | old");
    }

    #[test]
    fn contained_details_are_not_repeated() {
        let mut existing = record("A");
        existing.details = "Open daily | Walk-ins welcome".into();
        let mut incoming = record("A");
        incoming.details = "Walk-ins welcome".into();
        merge(&mut existing, incoming, DetailsMerge::Append);
        assert_eq!(existing.details, "Open daily | Walk-ins welcome");
    }

    #[test]
    fn empty_details_take_incoming_without_separator() {
        let mut existing = record("A");
        let mut incoming = record("A");
        incoming.details = "only".into();
        merge(&mut existing, incoming, DetailsMerge::Prepend);
        assert_eq!(existing.details, "only");
    }

    #[test]
    fn upsert_collapses_spelling_variants() {
        let mut store = RecordStore::new();
        let first = record("ABC Shelter").with_tag("Housing");
        let second = record("abc   shelter").with_tag("Food");

        assert_eq!(store.upsert(first, DetailsMerge::Append), Upsert::Created);
        assert_eq!(store.upsert(second, DetailsMerge::Append), Upsert::Merged);

        assert_eq!(store.len(), 1);
        let stored = store.get("Abc Shelter").expect("record stored");
        assert_eq!(stored.name, "ABC Shelter");
        assert_eq!(stored.tags_display(), "Food; Housing");
    }

    #[test]
    fn placeholders_and_blank_names_are_rejected() {
        let mut store = RecordStore::new();
        assert_eq!(store.upsert(record("Name/Title"), DetailsMerge::Append), Upsert::Rejected);
        assert_eq!(store.insert_or_tag(record("   ")), Upsert::Rejected);
        assert!(store.is_empty());
    }

    #[test]
    fn insert_or_tag_leaves_fields_alone() {
        let mut store = RecordStore::new();
        let mut base = record("Acme");
        base.details = "kept".into();
        store.upsert(base, DetailsMerge::Append);

        let mut incoming = record("ACME").with_tag("Employment");
        incoming.details = "ignored".into();
        incoming.phone = "303-555-0000".into();
        assert_eq!(store.insert_or_tag(incoming), Upsert::Merged);

        let stored = store.get("acme").expect("record stored");
        assert_eq!(stored.details, "kept");
        assert_eq!(stored.phone, "");
        assert!(stored.tags.contains("Employment"));
    }

    #[test]
    fn retain_reports_removed_count() {
        let mut store = RecordStore::new();
        store.upsert(record("Keep me"), DetailsMerge::Append);
        store.upsert(record("xx"), DetailsMerge::Append);
        assert_eq!(store.retain(|record| record.name.len() > 2), 1);
        assert!(store.contains("keep me"));
    }
}

//! Adapters for the 5-column layout shared by the tag files and the master
//! table: name, phone, web/email, address, details.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::extract::split_web_email;
use crate::model::{EntityRecord, RURAL, SEX_OFFENDER};
use crate::normalize::{is_header_label, is_placeholder, normalize_name};
use crate::store::{DetailsMerge, RecordStore};
use crate::summary::StageCounts;
use crate::table::{SourceTables, cell};

pub const MASTER_TABLE: &str = "Master";

/// Tag files in load order. Each file name is also the tag it grants.
pub const TAG_FILES: &[&str] = &[
    "Benefits",
    "Education",
    "Elderly",
    "Employment",
    "Food",
    "LGBTQ",
    "Legal",
    "Medical",
    "Native-Indigenous",
    "Resource-Databases",
    "Rural",
    "SO",
    "Transportation",
    "Unknown",
    "Veterans",
    "Youth-and-Family",
];

/// Tag files whose entries are added to the store even when the master
/// table does not list them.
pub const FALLBACK_TAG_FILES: [&str; 2] = [RURAL, SEX_OFFENDER];

/// Identity key → tags granted by tag-file membership.
pub type TagMap = BTreeMap<String, BTreeSet<String>>;

/// Index of the first data row: the row after the first header row, or 0
/// when the table has no header.
pub fn data_start(rows: &[Vec<String>]) -> usize {
    rows.iter()
        .position(|row| row.first().is_some_and(|first| is_header_label(first)))
        .map_or(0, |header| header + 1)
}

/// Converts one 5-column row. Blank and placeholder names yield `None`.
pub fn standard_record(row: &[String]) -> Option<EntityRecord> {
    let name = cell(row, 0);
    if name.is_empty() {
        return None;
    }
    if is_placeholder(&normalize_name(name)) {
        debug!(name, "skipping placeholder row");
        return None;
    }

    let contact = split_web_email(cell(row, 2));
    Some(EntityRecord {
        name: name.to_string(),
        phone: cell(row, 1).to_string(),
        web_link: contact.url,
        email: contact.email,
        physical_address: cell(row, 3).to_string(),
        details: cell(row, 4).to_string(),
        tags: BTreeSet::new(),
    })
}

/// Reads a 5-column table, detecting an optional header row.
pub fn read_standard_rows(rows: &[Vec<String>]) -> Vec<EntityRecord> {
    rows.iter()
        .skip(data_start(rows))
        .filter_map(|row| standard_record(row))
        .collect()
}

/// Collects tag-file membership for every name, without touching the store.
#[instrument(level = "info", skip_all)]
pub fn build_tag_map(tables: &SourceTables) -> TagMap {
    let mut tag_map = TagMap::new();
    for tag in TAG_FILES {
        for record in read_standard_rows(tables.rows(tag)) {
            tag_map
                .entry(record.identity_key())
                .or_default()
                .insert(tag.to_string());
        }
    }
    tag_map
}

/// Seeds the store from the master table, attaching tags from `tag_map`.
///
/// The first row is always a header. Repeated names merge into the first
/// occurrence.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn load_master(rows: &[Vec<String>], tag_map: &TagMap, store: &mut RecordStore) -> StageCounts {
    let mut counts = StageCounts::default();
    for row in rows.iter().skip(1) {
        let Some(mut record) = standard_record(row) else {
            continue;
        };
        if let Some(tags) = tag_map.get(&record.identity_key()) {
            record.tags.extend(tags.iter().cloned());
        }
        counts.record(store.upsert(record, DetailsMerge::Append));
    }
    counts
}

/// Adds entries of a fallback tag file that the master table lacks; entries
/// already present only gain `tag`.
#[instrument(level = "info", skip(rows, store), fields(rows = rows.len()))]
pub fn add_fallback_entries(rows: &[Vec<String>], tag: &str, store: &mut RecordStore) -> StageCounts {
    let mut counts = StageCounts::default();
    for record in read_standard_rows(rows) {
        counts.record(store.insert_or_tag(record.with_tag(tag)));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_row_is_detected_anywhere() {
        let table = rows(&[&["Food resources"], &[" Name/Title ", "Phone"], &["Pantry"]]);
        assert_eq!(data_start(&table), 2);
        assert_eq!(data_start(&rows(&[&["Pantry"], &["Shelf"]])), 0);
    }

    #[test]
    fn standard_rows_split_contact_cell() {
        let table = rows(&[
            &["Name", "Phone", "Web", "Address", "Details"],
            &["Pantry ", "303-555-0100", "info@pantry.org www.pantry.org", "1 Main St", "Open"],
            &["", "ignored"],
            &["Harry Potter", "x"],
            &["Short row"],
        ]);
        let records = read_standard_rows(&table);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Pantry");
        assert_eq!(records[0].email, "info@pantry.org");
        assert_eq!(records[0].web_link, "www.pantry.org");
        assert_eq!(records[0].physical_address, "1 Main St");
        assert_eq!(records[1].name, "Short row");
        assert_eq!(records[1].details, "");
    }

    #[test]
    fn tag_map_unions_membership_across_files() {
        let tables = SourceTables::new()
            .with_table("Food", [["Name"], ["Community Pantry"]])
            .with_table("Benefits", [["community  pantry"]]);
        let tag_map = build_tag_map(&tables);

        let tags = tag_map.get("community pantry").expect("entry present");
        assert_eq!(tags.iter().map(String::as_str).collect::<Vec<_>>(), vec!["Benefits", "Food"]);
    }

    #[test]
    fn master_rows_pick_up_tag_map_and_merge_duplicates() {
        let mut tag_map = TagMap::new();
        tag_map.insert("pantry".into(), BTreeSet::from(["Food".to_string()]));
        let master = rows(&[
            &["Name/Title", "Phone", "Web/Link", "Address", "Details"],
            &["Pantry", "", "", "", "Open Mondays"],
            &["PANTRY", "303-555-0100", "", "", "Bring ID"],
        ]);
        let mut store = RecordStore::new();
        let counts = load_master(&master, &tag_map, &mut store);

        assert_eq!(counts.created, 1);
        assert_eq!(counts.merged, 1);
        let record = store.get("pantry").expect("record stored");
        assert_eq!(record.phone, "303-555-0100");
        assert_eq!(record.details, "Open Mondays | Bring ID");
        assert!(record.tags.contains("Food"));
    }

    #[test]
    fn fallback_entries_only_tag_existing_records() {
        let mut store = RecordStore::new();
        let mut existing = EntityRecord::new("Mountain Clinic");
        existing.phone = "970-555-0100".into();
        store.upsert(existing, DetailsMerge::Append);

        let rural = rows(&[&["Mountain Clinic", "000"], &["Plains Pantry"]]);
        let counts = add_fallback_entries(&rural, RURAL, &mut store);

        assert_eq!((counts.created, counts.merged), (1, 1));
        let clinic = store.get("mountain clinic").expect("clinic stored");
        assert_eq!(clinic.phone, "970-555-0100");
        assert!(clinic.tags.contains(RURAL));
        assert!(store.get("plains pantry").expect("added").tags.contains(RURAL));
    }
}

//! Adapter for the single-column list of felon-friendly employers.

use tracing::instrument;

use crate::model::{EMPLOYMENT, EntityRecord, JOBS_FELON_FRIENDLY};
use crate::store::RecordStore;
use crate::summary::StageCounts;
use crate::table::cell;

pub const JOBS_FELON_FRIENDLY_TABLE: &str = "Jobs-Felon-Friendly";

/// Details given to employers that no other source describes.
pub const EMPLOYER_NOTE: &str = "Employer known to hire individuals with felony records.";

/// Adds a stub record for every unknown employer; known employers only gain
/// the employment tags. The table has no header row.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn add_felon_friendly_jobs(rows: &[Vec<String>], store: &mut RecordStore) -> StageCounts {
    let mut counts = StageCounts::default();
    for row in rows {
        let name = cell(row, 0);
        if name.is_empty() {
            continue;
        }
        let mut record = EntityRecord::new(name).with_tags([EMPLOYMENT, JOBS_FELON_FRIENDLY]);
        record.details = EMPLOYER_NOTE.to_string();
        counts.record(store.insert_or_tag(record));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DetailsMerge;

    #[test]
    fn unknown_employers_get_stub_records() {
        let rows = vec![vec!["Abbott Laboratories".to_string()], vec![String::new()]];
        let mut store = RecordStore::new();
        let counts = add_felon_friendly_jobs(&rows, &mut store);

        assert_eq!(counts.created, 1);
        let employer = store.get("abbott laboratories").expect("employer stored");
        assert_eq!(employer.details, EMPLOYER_NOTE);
        assert_eq!(employer.tags_display(), "Employment; Jobs-Felon-Friendly");
    }

    #[test]
    fn known_employers_only_gain_tags() {
        let mut store = RecordStore::new();
        let mut existing = EntityRecord::new("Goodwill").with_tag("Education");
        existing.details = "Thrift and training".into();
        store.upsert(existing, DetailsMerge::Append);

        let rows = vec![vec!["GOODWILL ".to_string()]];
        let counts = add_felon_friendly_jobs(&rows, &mut store);

        assert_eq!(counts.merged, 1);
        let employer = store.get("goodwill").expect("employer stored");
        assert_eq!(employer.details, "Thrift and training");
        assert_eq!(employer.tags_display(), "Education; Employment; Jobs-Felon-Friendly");
    }

    #[test]
    fn placeholder_names_are_not_stored() {
        let rows = vec![vec!["Name".to_string()]];
        let mut store = RecordStore::new();
        let counts = add_felon_friendly_jobs(&rows, &mut store);
        assert_eq!(counts.rejected, 1);
        assert!(store.is_empty());
    }
}

//! Statistics gathered while a consolidation run progresses.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::model::EntityRecord;
use crate::store::Upsert;

/// Outcome counts for one adapter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub created: usize,
    pub merged: usize,
    pub rejected: usize,
}

impl StageCounts {
    pub fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Created => self.created += 1,
            Upsert::Merged => self.merged += 1,
            Upsert::Rejected => self.rejected += 1,
        }
    }
}

/// Number of records carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Everything worth reporting about a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Distinct names seen across all tag files.
    pub tag_map_entries: usize,
    /// Adapter outcomes keyed by stage name.
    pub stages: BTreeMap<String, StageCounts>,
    /// Records that received inferred tags.
    pub auto_tagged: usize,
    /// Emitted records tagged only `Uncategorized`.
    pub uncategorized: usize,
    pub junk_removed: usize,
    pub total_records: usize,
    /// Sorted by descending count, then by tag name.
    pub tag_counts: Vec<TagCount>,
}

impl Summary {
    pub fn record_stage(&mut self, stage: impl Into<String>, counts: StageCounts) {
        self.stages.insert(stage.into(), counts);
    }

    /// Fills the totals from the final, sorted record list.
    pub fn finish(&mut self, records: &[EntityRecord]) {
        self.total_records = records.len();
        self.uncategorized = records.iter().filter(|record| record.is_uncategorized()).count();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in records.iter().flat_map(|record| record.tags.iter()) {
            *counts.entry(tag.as_str()).or_default() += 1;
        }

        let mut tag_counts: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tag_counts.sort_by(|lhs, rhs| {
            rhs.count
                .cmp(&lhs.count)
                .then_with(|| lhs.tag.cmp(&rhs.tag))
        });
        self.tag_counts = tag_counts;
    }

    /// Emits the per-tag breakdown through `tracing`.
    pub fn log(&self) {
        info!(
            total = self.total_records,
            auto_tagged = self.auto_tagged,
            uncategorized = self.uncategorized,
            junk_removed = self.junk_removed,
            "consolidation finished"
        );
        for entry in &self.tag_counts {
            info!(tag = %entry.tag, count = entry.count, "entries per tag");
        }
    }
}

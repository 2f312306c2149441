//! Sequential driver that runs every adapter against one shared store.
//!
//! The stages run strictly in the order of [`Stage`]; each reads the
//! tables it needs plus the current store and leaves an updated store
//! behind. There is no branching and no retry.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::adapters::{
    FALLBACK_TAG_FILES, HOUSING_FELON_FRIENDLY_TABLE, JOBS_FELON_FRIENDLY_TABLE, MASTER_TABLE,
    TagMap, WEATHER_SHELTER_TABLE, add_fallback_entries, add_felon_friendly_housing,
    add_felon_friendly_jobs, add_weather_shelters, build_tag_map, load_master,
};
use crate::model::{EntityRecord, UNCATEGORIZED};
use crate::normalize::is_junk_name;
use crate::store::RecordStore;
use crate::summary::{StageCounts, Summary};
use crate::table::SourceTables;
use crate::tagging::infer_tags;

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    BuildTagMap,
    LoadMaster,
    AddRuralSo,
    AddWeatherShelter,
    AddFelonHousing,
    AddFelonJobs,
    AutoTag,
    FilterJunk,
    SortAndEmit,
    Done,
}

impl Stage {
    /// The stage that follows this one. `Done` is terminal.
    pub const fn next(self) -> Stage {
        match self {
            Stage::BuildTagMap => Stage::LoadMaster,
            Stage::LoadMaster => Stage::AddRuralSo,
            Stage::AddRuralSo => Stage::AddWeatherShelter,
            Stage::AddWeatherShelter => Stage::AddFelonHousing,
            Stage::AddFelonHousing => Stage::AddFelonJobs,
            Stage::AddFelonJobs => Stage::AutoTag,
            Stage::AutoTag => Stage::FilterJunk,
            Stage::FilterJunk => Stage::SortAndEmit,
            Stage::SortAndEmit | Stage::Done => Stage::Done,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stage::BuildTagMap => "build-tag-map",
            Stage::LoadMaster => "load-master",
            Stage::AddRuralSo => "add-rural-so",
            Stage::AddWeatherShelter => "add-weather-shelter",
            Stage::AddFelonHousing => "add-felon-housing",
            Stage::AddFelonJobs => "add-felon-jobs",
            Stage::AutoTag => "auto-tag",
            Stage::FilterJunk => "filter-junk",
            Stage::SortAndEmit => "sort-and-emit",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final output of a run: records in output order plus statistics.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub records: Vec<EntityRecord>,
    pub summary: Summary,
}

/// State carried between stages.
#[derive(Debug)]
pub struct Pipeline<'a> {
    tables: &'a SourceTables,
    stage: Stage,
    tag_map: TagMap,
    store: RecordStore,
    records: Vec<EntityRecord>,
    summary: Summary,
}

impl<'a> Pipeline<'a> {
    pub fn new(tables: &'a SourceTables) -> Self {
        Self {
            tables,
            stage: Stage::BuildTagMap,
            tag_map: TagMap::new(),
            store: RecordStore::new(),
            records: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// The stage that the next call to [`step`](Self::step) will run.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Runs the current stage and advances. Returns the new stage.
    pub fn step(&mut self) -> Stage {
        let tables = self.tables;
        match self.stage {
            Stage::BuildTagMap => {
                self.tag_map = build_tag_map(tables);
                self.summary.tag_map_entries = self.tag_map.len();
            }
            Stage::LoadMaster => {
                let counts = load_master(tables.rows(MASTER_TABLE), &self.tag_map, &mut self.store);
                self.finish_stage(counts);
            }
            Stage::AddRuralSo => {
                for tag in FALLBACK_TAG_FILES {
                    let counts = add_fallback_entries(tables.rows(tag), tag, &mut self.store);
                    self.summary.record_stage(format!("{}:{tag}", self.stage), counts);
                }
            }
            Stage::AddWeatherShelter => {
                let rows = tables.rows(WEATHER_SHELTER_TABLE);
                let counts = add_weather_shelters(rows, &mut self.store);
                self.finish_stage(counts);
            }
            Stage::AddFelonHousing => {
                let rows = tables.rows(HOUSING_FELON_FRIENDLY_TABLE);
                let counts = add_felon_friendly_housing(rows, &mut self.store);
                self.finish_stage(counts);
            }
            Stage::AddFelonJobs => {
                let rows = tables.rows(JOBS_FELON_FRIENDLY_TABLE);
                let counts = add_felon_friendly_jobs(rows, &mut self.store);
                self.finish_stage(counts);
            }
            Stage::AutoTag => {
                self.summary.auto_tagged = auto_tag(&mut self.store);
            }
            Stage::FilterJunk => {
                self.summary.junk_removed = filter_junk(&mut self.store);
            }
            Stage::SortAndEmit => {
                let mut records = std::mem::take(&mut self.store).into_records();
                sort_records(&mut records);
                self.summary.finish(&records);
                self.records = records;
            }
            Stage::Done => {}
        }

        debug!(stage = %self.stage, records = self.store.len(), "stage complete");
        self.stage = self.stage.next();
        self.stage
    }

    /// Runs every remaining stage.
    #[instrument(level = "info", skip_all)]
    pub fn run(mut self) -> Consolidation {
        while self.stage != Stage::Done {
            self.step();
        }
        Consolidation {
            records: self.records,
            summary: self.summary,
        }
    }

    fn finish_stage(&mut self, counts: StageCounts) {
        info!(
            stage = %self.stage,
            created = counts.created,
            merged = counts.merged,
            rejected = counts.rejected,
            total = self.store.len(),
            "adapter finished"
        );
        self.summary.record_stage(self.stage.name(), counts);
    }
}

/// Runs the whole pipeline over in-memory tables.
pub fn consolidate(tables: &SourceTables) -> Consolidation {
    Pipeline::new(tables).run()
}

/// Infers tags for every record that no source tagged. Records without a
/// keyword match get [`UNCATEGORIZED`]. Returns how many received inferred
/// tags.
#[instrument(level = "info", skip_all)]
pub fn auto_tag(store: &mut RecordStore) -> usize {
    let mut inferred = 0;
    let mut uncategorized = 0;
    for record in store.records_mut().filter(|record| record.tags.is_empty()) {
        let text = format!("{} {}", record.name, record.details);
        let tags = infer_tags(&text);
        if tags.is_empty() {
            record.tags.insert(UNCATEGORIZED.to_string());
            uncategorized += 1;
        } else {
            record.tags.extend(tags.into_iter().map(str::to_string));
            inferred += 1;
        }
    }
    info!(inferred, uncategorized, "auto-tagging finished");
    inferred
}

/// Removes records whose name is a bare URL or too short. Returns the
/// number removed.
#[instrument(level = "info", skip_all)]
pub fn filter_junk(store: &mut RecordStore) -> usize {
    let removed = store.retain(|record| {
        let junk = is_junk_name(&record.name);
        if junk {
            debug!(name = %record.name, "removing junk entry");
        }
        !junk
    });
    info!(removed, "junk entries removed");
    removed
}

/// Categorised records first, then `Uncategorized` ones; alphabetical
/// (case-insensitive) within each group.
pub fn sort_records(records: &mut [EntityRecord]) {
    records.sort_by_cached_key(|record| (record.is_uncategorized(), record.name.to_lowercase()));
}

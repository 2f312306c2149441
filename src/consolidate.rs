use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::adapters::{
    HOUSING_FELON_FRIENDLY_TABLE, JOBS_FELON_FRIENDLY_TABLE, MASTER_TABLE, TAG_FILES,
    WEATHER_SHELTER_TABLE,
};
use crate::error::{Result, ToolError};
use crate::io::{self, csv_read};
use crate::pipeline;
use crate::summary::Summary;
use crate::table::build_master_table;

/// Every logical table the pipeline reads.
pub fn input_tables() -> impl Iterator<Item = &'static str> {
    TAG_FILES.iter().copied().chain([
        MASTER_TABLE,
        WEATHER_SHELTER_TABLE,
        HOUSING_FELON_FRIENDLY_TABLE,
        JOBS_FELON_FRIENDLY_TABLE,
    ])
}

/// Consolidates the tables found in `data_dir` into one master table at
/// `output`. Every input is read before the output is written, so `output`
/// may point at the master table itself.
#[instrument(
    level = "info",
    skip_all,
    fields(data_dir = %data_dir.display(), output = %output.display())
)]
pub fn consolidate_directory(data_dir: &Path, output: &Path) -> Result<Summary> {
    if !data_dir.is_dir() {
        return Err(ToolError::MissingInput(data_dir.to_path_buf()));
    }
    io::OutputFormat::detect(output)?;

    let tables = csv_read::load_tables(data_dir, input_tables())?;
    let consolidation = pipeline::consolidate(&tables);

    let table = build_master_table(&consolidation.records);
    io::write_table(output, &table)?;
    info!(records = table.rows.len(), "master table written");

    Ok(consolidation.summary)
}

/// Persists the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

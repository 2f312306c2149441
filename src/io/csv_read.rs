use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::io::excel_read;
use crate::table::{Rows, SourceTables};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses CSV text into raw rows.
///
/// No header interpretation is done and rows may differ in width. A leading
/// byte order mark is dropped.
pub fn parse_rows(text: &str) -> Result<Rows> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Rows::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Reads a CSV file, replacing invalid UTF-8 instead of failing.
pub fn read_rows(path: &Path) -> Result<Rows> {
    let bytes = fs::read(path)?;
    parse_rows(&String::from_utf8_lossy(&bytes))
}

/// Finds the file backing a logical table name: `<name>.csv`, then
/// `<name>.xlsx`.
pub fn locate_table(dir: &Path, name: &str) -> Option<PathBuf> {
    ["csv", "xlsx"]
        .iter()
        .map(|extension| dir.join(format!("{name}.{extension}")))
        .find(|candidate| candidate.is_file())
}

/// Loads the named tables from `dir`. Missing tables are logged and left
/// out, so they read as empty.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn load_tables<'n, I>(dir: &Path, names: I) -> Result<SourceTables>
where
    I: IntoIterator<Item = &'n str>,
{
    let mut tables = SourceTables::new();
    for name in names {
        let Some(path) = locate_table(dir, name) else {
            warn!(table = name, "input table not found; it contributes nothing");
            continue;
        };
        let rows = match path.extension().and_then(|ext| ext.to_str()) {
            Some("xlsx") => excel_read::read_rows(&path)?,
            _ => read_rows(&path)?,
        };
        debug!(table = name, path = %path.display(), rows = rows.len(), "loaded table");
        tables.insert(name, rows);
    }
    info!("input tables loaded");
    Ok(tables)
}

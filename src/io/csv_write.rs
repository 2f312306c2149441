use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::error::Result;
use crate::table::SheetTable;

/// Writes the header row followed by every data row.
pub fn write_table(path: &Path, table: &SheetTable) -> Result<()> {
    debug!(rows = table.rows.len(), path = %path.display(), "writing CSV table");

    let mut writer = Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

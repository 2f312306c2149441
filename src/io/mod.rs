pub mod csv_read;
pub mod csv_write;
pub mod excel_read;
pub mod excel_write;

use std::path::Path;

use crate::error::{Result, ToolError};
use crate::table::SheetTable;

/// File formats the master table can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Excel,
}

impl OutputFormat {
    /// Infers the format from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Excel),
            _ => Err(ToolError::UnsupportedOutput(extension)),
        }
    }
}

/// Writes a table in the format implied by `path`.
pub fn write_table(path: &Path, table: &SheetTable) -> Result<()> {
    match OutputFormat::detect(path)? {
        OutputFormat::Csv => csv_write::write_table(path, table),
        OutputFormat::Excel => excel_write::write_table(path, table),
    }
}

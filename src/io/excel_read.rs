use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{Result, ToolError};
use crate::table::Rows;

/// Reads every row of the first worksheet as strings.
///
/// Empty cells become empty strings; trailing empty cells are kept, which
/// the adapters tolerate like short rows.
pub fn read_rows(path: &Path) -> Result<Rows> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet = workbook.sheet_names().first().cloned().ok_or_else(|| {
        ToolError::InvalidWorkbook(format!("no worksheet in {}", path.display()))
    })?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{sheet}'")))?
        .map_err(ToolError::from)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .collect())
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

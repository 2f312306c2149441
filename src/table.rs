//! Tabular shapes shared by the loaders, the adapters and the writers.

use std::collections::BTreeMap;

use crate::model::EntityRecord;

/// Sheet name used when the master table is written as a workbook.
pub const MASTER_SHEET: &str = "Master";

/// Header row of the consolidated output.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Name/Title",
    "Phone",
    "Web/Link",
    "Email",
    "Physical Address",
    "Information/Details",
    "Tags",
];

/// Rows of one input table, exactly as read. No header interpretation.
pub type Rows = Vec<Vec<String>>;

/// Input tables addressed by logical name (`Master`, `Food`, ...).
///
/// A table that was never inserted reads as empty, so an absent source
/// contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    tables: BTreeMap<String, Rows>,
}

impl SourceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rows: Rows) {
        self.tables.insert(name.into(), rows);
    }

    /// Builder-style variant of [`insert`](Self::insert) for literal rows.
    pub fn with_table<R, C>(mut self, name: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.insert(name, rows);
        self
    }

    pub fn rows(&self, name: &str) -> &[Vec<String>] {
        self.tables.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

/// Returns the trimmed cell at `index`, or an empty string for short rows.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or("")
}

/// A table ready to be written: one header row and string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Projects sorted records onto the output columns.
pub fn build_master_table(records: &[EntityRecord]) -> SheetTable {
    let rows = records
        .iter()
        .map(|record| {
            vec![
                record.name.clone(),
                record.phone.clone(),
                record.web_link.clone(),
                record.email.clone(),
                record.physical_address.clone(),
                record.details.clone(),
                record.tags_display(),
            ]
        })
        .collect();

    SheetTable {
        sheet_name: MASTER_SHEET.to_string(),
        columns: OUTPUT_COLUMNS.iter().map(|column| column.to_string()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_tables_read_as_empty() {
        let tables = SourceTables::new().with_table("Food", [["Pantry"]]);
        assert_eq!(tables.rows("Food").len(), 1);
        assert!(tables.rows("Legal").is_empty());
        assert!(!tables.contains("Legal"));
    }

    #[test]
    fn short_rows_default_to_empty_cells() {
        let row = vec![" Name ".to_string()];
        assert_eq!(cell(&row, 0), "Name");
        assert_eq!(cell(&row, 4), "");
    }

    #[test]
    fn master_table_follows_output_columns() {
        let mut record = EntityRecord::new("Pantry").with_tags(["Food", "Benefits"]);
        record.phone = "303-555-0100".into();
        let table = build_master_table(&[record]);

        assert_eq!(table.columns, OUTPUT_COLUMNS.to_vec());
        assert_eq!(
            table.rows,
            vec![vec![
                "Pantry".to_string(),
                "303-555-0100".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                "Benefits; Food".to_string(),
            ]]
        );
    }
}

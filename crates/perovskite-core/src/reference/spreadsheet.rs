//! Spreadsheet reference tables (xlsx / xls / ods) via calamine
//!
//! Only the first worksheet is read. Its first row holds the column
//! headers; every following row is one entry.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::ReferenceTable;
use crate::{Error, Result};

/// Read the first worksheet of a workbook on disk
pub fn read(path: &Path) -> Result<ReferenceTable> {
    let load_error = |reason: String| Error::ReferenceData {
        path: path.display().to_string(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error("workbook has no worksheets".to_string()))?
        .map_err(|e| load_error(e.to_string()))?;

    table_from_range(&table_name(path), &range)
}

/// Build a table from a worksheet range
pub fn table_from_range(name: &str, range: &Range<Data>) -> Result<ReferenceTable> {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let body = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    ReferenceTable::new(name, headers, body)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

//! JSON reference tables
//!
//! A JSON table is an array of row objects keyed by column header:
//!
//! ```json
//! [
//!   {"Abbreviation": "MA", "Common_name": "Methylammonium", "CAS": "17000-00-9"},
//!   {"Abbreviation": "FA", "Common_name": "Formamidinium"}
//! ]
//! ```
//!
//! Column order follows first appearance across rows. Scalar cells are
//! rendered as text; `null` is blank.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::ReferenceTable;
use crate::{Error, Result};

/// Read a JSON table from disk
pub fn read(path: &Path) -> Result<ReferenceTable> {
    let text = fs::read_to_string(path).map_err(|e| Error::ReferenceData {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    parse(name, &text).map_err(|e| match e {
        Error::Input(reason) => Error::ReferenceData {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Parse a JSON table from text
pub fn parse(name: &str, text: &str) -> Result<ReferenceTable> {
    let rows: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(text).map_err(|e| Error::Input(e.to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let body = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    ReferenceTable::new(name, headers, body)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

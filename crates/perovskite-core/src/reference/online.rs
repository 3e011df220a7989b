//! Reference tables fetched from the upstream repository
//!
//! Requests are blocking and made once per table, before any
//! normalization starts. There is no retry: an unreachable source is a
//! load failure.

use std::io::Cursor;

use calamine::{Reader, Xlsx};

use super::{spreadsheet, ReferenceTable, TableKind};
use crate::{Error, Result};

/// URL of one table under `base_url`
pub fn table_url(base_url: &str, kind: TableKind) -> String {
    format!("{}/{}.xlsx", base_url.trim_end_matches('/'), kind.file_stem())
}

/// Download and decode one table
pub fn fetch_table(base_url: &str, kind: TableKind) -> Result<ReferenceTable> {
    let url = table_url(base_url, kind);
    let load_error = |reason: String| Error::ReferenceData {
        path: url.clone(),
        reason,
    };

    let response = reqwest::blocking::get(&url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| load_error(e.to_string()))?;
    let bytes = response.bytes().map_err(|e| load_error(e.to_string()))?;

    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| load_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error("workbook has no worksheets".to_string()))?
        .map_err(|e| load_error(e.to_string()))?;

    spreadsheet::table_from_range(kind.file_stem(), &range)
}

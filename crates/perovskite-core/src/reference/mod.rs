//! Reference lookup tables - chemical metadata keyed by abbreviation
//!
//! A table is a row-oriented grid with a unique-key column `Abbreviation`
//! and named string columns. The pipeline never sees how a table was
//! obtained; it only calls [`Lookup::lookup`].
//!
//! # Sources
//!
//! - [`Origin::Local`]: files in a data directory, spreadsheets read with
//!   calamine or JSON arrays of row objects
//! - [`Origin::Online`]: spreadsheets fetched from the upstream repository
//!   (cargo feature `online`)

pub mod json;
#[cfg(feature = "online")]
pub mod online;
pub mod spreadsheet;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::normalizer::is_sentinel;
use crate::{Error, Result};

/// Name of the unique-key column
pub const KEY_COLUMN: &str = "Abbreviation";

/// Upstream location of the maintained reference tables
pub const DEFAULT_BASE_URL: &str = "https://github.com/FAIRmat-NFDI/nomad-perovskite-solar-cells-database/raw/main/src/perovskite_solar_cell_database/schema_sections/ions";

/// Directory holding the reference tables shipped with a release
pub const DEFAULT_DATA_DIR: &str = "Data_ions";

/// Extensions tried, in order, when resolving a local table
pub const LOCAL_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "ods", "json"];

// ── Columns and tables ────────────────────────────────────

/// Descriptive columns consulted during enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    MolecularFormula,
    Smiles,
    CommonName,
    IupacName,
    Cas,
    ParentSmiles,
    ParentIupac,
    ParentCas,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::MolecularFormula,
        Column::Smiles,
        Column::CommonName,
        Column::IupacName,
        Column::Cas,
        Column::ParentSmiles,
        Column::ParentIupac,
        Column::ParentCas,
    ];

    /// Header of the column in the reference files
    pub fn header(self) -> &'static str {
        match self {
            Column::MolecularFormula => "Molecular_formula",
            Column::Smiles => "SMILE",
            Column::CommonName => "Common_name",
            Column::IupacName => "IUPAC_name",
            Column::Cas => "CAS",
            Column::ParentSmiles => "Parent_SMILE",
            Column::ParentIupac => "Parent_IUPAC",
            Column::ParentCas => "Parent_CAS",
        }
    }
}

/// Which of the four reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    AIons,
    BIons,
    XIons,
    Additives,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::AIons,
        TableKind::BIons,
        TableKind::XIons,
        TableKind::Additives,
    ];

    /// File stem used by the reference data sets. The X-site file keeps
    /// its historical `C-` prefix.
    pub fn file_stem(self) -> &'static str {
        match self {
            TableKind::AIons => "A-ion_data",
            TableKind::BIons => "B-ion_data",
            TableKind::XIons => "C-ion_data",
            TableKind::Additives => "additives_and_impurities",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Lookup interface the enrichment stage depends on
pub trait Lookup {
    /// Value of `column` for the first row whose key equals `abbreviation`.
    ///
    /// `None` when no row matches or the cell is blank.
    fn lookup(&self, abbreviation: &str, column: Column) -> Option<&str>;
}

/// One reference table held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    key: usize,
}

impl ReferenceTable {
    /// Build a table from a header row and data rows.
    ///
    /// Cells are trimmed; blank and `nan` cells are stored as absent.
    /// Short rows are padded with absent cells.
    ///
    /// # Errors
    /// Returns `MissingColumn` when no header is `Abbreviation`.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let name = name.into();
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let key = headers
            .iter()
            .position(|h| h == KEY_COLUMN)
            .ok_or_else(|| Error::MissingColumn {
                table: name.clone(),
                column: KEY_COLUMN.to_string(),
            })?;

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<Option<String>> = row
                    .into_iter()
                    .take(width)
                    .map(|cell| {
                        let cell = cell.trim();
                        if is_sentinel(cell) {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect();
                cells.resize(width, None);
                cells
            })
            .collect();

        Ok(Self {
            name,
            headers,
            rows,
            key,
        })
    }

    /// Convenience constructor from string slices
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All abbreviations in the table, sorted and deduplicated
    pub fn abbreviations(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .rows
            .iter()
            .filter_map(|row| row[self.key].clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

impl Lookup for ReferenceTable {
    fn lookup(&self, abbreviation: &str, column: Column) -> Option<&str> {
        let index = self.column_index(column.header())?;
        self.rows
            .iter()
            .find(|row| row[self.key].as_deref() == Some(abbreviation))
            .and_then(|row| row[index].as_deref())
    }
}

// ── Reference data set ────────────────────────────────────

/// Where reference tables come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Files shipped with a release, in a local directory
    #[default]
    Local,
    /// Current files from the upstream repository
    Online,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Local => f.write_str("local"),
            Origin::Online => f.write_str("online"),
        }
    }
}

impl std::str::FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Origin::Local),
            "online" => Ok(Origin::Online),
            other => Err(Error::Input(format!(
                "unknown reference data origin '{}' (expected 'local' or 'online')",
                other
            ))),
        }
    }
}

/// The four tables one conversion consults.
///
/// Passed explicitly into the pipeline; nothing reads the origin from
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub a_ions: ReferenceTable,
    pub b_ions: ReferenceTable,
    pub x_ions: ReferenceTable,
    pub additives: ReferenceTable,
}

impl ReferenceData {
    /// Load all four tables from the given origin.
    ///
    /// `data_dir` is used by [`Origin::Local`], `base_url` by
    /// [`Origin::Online`].
    ///
    /// # Errors
    /// Any table that cannot be found, fetched, or decoded fails the whole
    /// load; nothing is normalized against a partial data set.
    pub fn load(origin: Origin, data_dir: &Path, base_url: &str) -> Result<Self> {
        match origin {
            Origin::Local => Self::load_local(data_dir),
            Origin::Online => Self::load_online(base_url),
        }
    }

    /// Load the tables from a local directory
    pub fn load_local(dir: &Path) -> Result<Self> {
        let load = |kind: TableKind| -> Result<ReferenceTable> {
            let path = resolve_local(dir, kind)?;
            let table = load_table_file(&path)?;
            log::info!("loaded {} ({} rows) from {}", kind, table.len(), path.display());
            Ok(table)
        };
        Ok(Self {
            a_ions: load(TableKind::AIons)?,
            b_ions: load(TableKind::BIons)?,
            x_ions: load(TableKind::XIons)?,
            additives: load(TableKind::Additives)?,
        })
    }

    #[cfg(feature = "online")]
    pub fn load_online(base_url: &str) -> Result<Self> {
        let load = |kind: TableKind| -> Result<ReferenceTable> {
            let table = online::fetch_table(base_url, kind)?;
            log::info!("fetched {} ({} rows) from {}", kind, table.len(), base_url);
            Ok(table)
        };
        Ok(Self {
            a_ions: load(TableKind::AIons)?,
            b_ions: load(TableKind::BIons)?,
            x_ions: load(TableKind::XIons)?,
            additives: load(TableKind::Additives)?,
        })
    }

    #[cfg(not(feature = "online"))]
    pub fn load_online(base_url: &str) -> Result<Self> {
        Err(Error::ReferenceData {
            path: base_url.to_string(),
            reason: "built without the 'online' feature".to_string(),
        })
    }

    /// Table for a given kind
    pub fn table(&self, kind: TableKind) -> &ReferenceTable {
        match kind {
            TableKind::AIons => &self.a_ions,
            TableKind::BIons => &self.b_ions,
            TableKind::XIons => &self.x_ions,
            TableKind::Additives => &self.additives,
        }
    }
}

/// Find the file for `kind` in `dir`, trying [`LOCAL_EXTENSIONS`] in order
pub fn resolve_local(dir: &Path, kind: TableKind) -> Result<PathBuf> {
    LOCAL_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", kind.file_stem(), ext)))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::ReferenceData {
            path: dir.join(kind.file_stem()).display().to_string(),
            reason: format!("no table file (tried {})", LOCAL_EXTENSIONS.join(", ")),
        })
}

/// Load a single table file, dispatching on its extension
pub fn load_table_file(path: &Path) -> Result<ReferenceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => json::read(path),
        _ => spreadsheet::read(path),
    }
}

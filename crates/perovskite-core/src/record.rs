//! Record assembler - the final document and its serialized form
//!
//! # Pruning
//!
//! - scalar fields are `Option`s and skipped when `None`
//! - list fields are skipped when empty
//! - `m_def` is always present
//!
//! The record sits under a single top-level `data` key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::additive::AdditiveRecord;
use crate::site::IonRecord;
use crate::{Error, Result};

/// Schema identifier expected by the NOMAD perovskite database
pub const SCHEMA_ID: &str = "perovskite_solar_cell_database.composition.PerovskiteComposition";

/// Indentation of the serialized document
const INDENT: &[u8] = b"    ";

/// Assembled perovskite composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerovskiteRecord {
    pub m_def: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition_estimate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_gap: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ions_a_site: Vec<IonRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ions_b_site: Vec<IonRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ions_x_site: Vec<IonRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additives: Vec<AdditiveRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub impurities: Vec<AdditiveRecord>,
}

impl Default for PerovskiteRecord {
    fn default() -> Self {
        Self {
            m_def: SCHEMA_ID.to_string(),
            long_form: None,
            short_form: None,
            composition_estimate: None,
            sample_type: None,
            dimensionality: None,
            band_gap: None,
            ions_a_site: Vec::new(),
            ions_b_site: Vec::new(),
            ions_x_site: Vec::new(),
            additives: Vec::new(),
            impurities: Vec::new(),
        }
    }
}

/// The serialized document: `{"data": { … }}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub data: PerovskiteRecord,
}

impl Document {
    pub fn new(data: PerovskiteRecord) -> Self {
        Self { data }
    }

    /// Pretty-printed JSON with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| Error::Serialization(serde::ser::Error::custom(e)))
    }

    /// The document as a JSON value
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write the document, replacing any existing file.
    ///
    /// The path is adjusted by [`output_path`]; the adjusted path is
    /// returned.
    ///
    /// # Errors
    /// Returns `Write` when the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let path = output_path(path);
        let json = self.to_json()?;
        fs::write(&path, json).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("saved composition to {}", path.display());
        Ok(path)
    }
}

/// Strip a trailing `.txt` and make sure the path ends in `.json`
pub fn output_path(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();
    let mut s = raw.strip_suffix(".txt").unwrap_or(&raw[..]).to_string();
    if !s.ends_with(".json") {
        s.push_str(".json");
    }
    PathBuf::from(s)
}

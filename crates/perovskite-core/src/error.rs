//! Error types for the perovskite composition pipeline
//!
//! Malformed numbers and unknown abbreviations are *not* errors: they are
//! resolved by substitution inside the normalizer and the list processors.
//! What remains here are structural input problems and failures of the
//! outer collaborators (reference tables, output file).

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline error types
#[derive(Debug, Error)]
pub enum Error {
    /// A value list is longer than the abbreviation list it is paired with
    #[error("Length mismatch: {list} has {values} entries but only {abbreviations} abbreviations")]
    LengthMismatch {
        list: String,
        values: usize,
        abbreviations: usize,
    },

    /// Reference table could not be located, fetched, or decoded
    #[error("Reference data error ({path}): {reason}")]
    ReferenceData { path: String, reason: String },

    /// Reference table lacks a required column
    #[error("Reference table {table} has no '{column}' column")]
    MissingColumn { table: String, column: String },

    /// The input document could not be decoded
    #[error("Input error: {0}")]
    Input(String),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output document could not be written
    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// environment (tables, filesystem, network)
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::LengthMismatch { .. } | Error::Input(_))
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

//! Raw input document - the shapes handed over by an input collector
//!
//! The collector (form, CLI, API) is outside this crate. All it has to
//! provide is flat scalars and parallel lists; each scalar may arrive as a
//! string, a number, or `null`. Nothing is interpreted here: rendering and
//! cleaning belong to [`crate::normalizer`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A loosely typed scalar as entered by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(serde_json::Number),
    #[default]
    Null,
}

impl RawValue {
    /// Render the value as text, the way it was written.
    ///
    /// Numbers keep their literal form (`1` stays `"1"`, `1.0` stays `"1.0"`),
    /// `null` renders as the empty string. No trimming happens here.
    pub fn text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Null => String::new(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        match serde_json::Number::from_f64(v) {
            Some(n) => RawValue::Number(n),
            None => RawValue::Text(v.to_string()),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v.into())
    }
}

/// Everything a collector may submit for one composition.
///
/// Field names follow the keys of the input JSON document. Every key is
/// optional; absent lists are empty and absent scalars are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawComposition {
    pub composition_estimate: RawValue,
    pub sample_type: RawValue,
    pub dimensionality: RawValue,
    #[serde(alias = "band_gap")]
    pub bandgap: RawValue,

    pub a_ions_abbreviations: Vec<RawValue>,
    pub a_coefficients: Vec<RawValue>,
    pub b_ions_abbreviations: Vec<RawValue>,
    pub b_coefficients: Vec<RawValue>,
    pub x_ions_abbreviations: Vec<RawValue>,
    pub x_coefficients: Vec<RawValue>,

    pub additives_abbreviations: Vec<RawValue>,
    pub additives_concentrations: Vec<RawValue>,
    pub additives_mass_fractions: Vec<RawValue>,
    pub impurities_abbreviations: Vec<RawValue>,
    pub impurities_concentrations: Vec<RawValue>,
    pub impurities_mass_fractions: Vec<RawValue>,
}

impl RawComposition {
    /// Decode an input document
    ///
    /// # Errors
    /// Returns `Error::Input` for malformed JSON, unknown keys, or values
    /// that are neither strings, numbers nor `null`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Input(e.to_string()))
    }
}

/// Build a raw list from Rust values.
///
/// For callers that assemble a [`RawComposition`] in code instead of
/// parsing a JSON document:
///
/// ```
/// use perovskite_core::input::{raw_list, RawComposition};
///
/// let raw = RawComposition {
///     x_ions_abbreviations: raw_list(&["I", "Br"]),
///     x_coefficients: raw_list(&[2.5, 0.5]),
///     ..Default::default()
/// };
/// assert_eq!(raw.x_coefficients.len(), 2);
/// ```
pub fn raw_list<T: Into<RawValue> + Clone>(items: &[T]) -> Vec<RawValue> {
    items.iter().cloned().map(Into::into).collect()
}

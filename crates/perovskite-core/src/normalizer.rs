//! Field normalizer - coerces raw user scalars into canonical values
//!
//! Every function here is total: conversion failures are resolved by the
//! documented fallback and never reach the caller.
//!
//! | field                          | cleaning                    | on failure        |
//! |--------------------------------|-----------------------------|-------------------|
//! | text (estimate, sample, dim.)  | trim                        | -                 |
//! | abbreviation                   | trim, unwrap `( … )`        | -                 |
//! | coefficient                    | trim, `,` → `.`, `""` → `1` | kept verbatim     |
//! | concentration / mass fraction  | `,` → `.`, trim, parse f64  | NaN marker        |
//! | band gap                       | `,` → `.`, trim, parse f64  | empty (`None`)    |
//!
//! Concentrations and the band gap fail differently: the first
//! keeps a numeric NaN marker, the second becomes empty. Both are dropped
//! from the final document.

use serde::{Serialize, Serializer};

use crate::input::RawValue;

/// Text standing for "no value" in raw input and reference cells
pub const NAN_TEXT: &str = "nan";

/// Coefficient assumed for an ion entered without one
pub const DEFAULT_COEFFICIENT: &str = "1";

// ── Coefficient ───────────────────────────────────────────

/// Stoichiometric coefficient of one ion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Coefficient {
    /// Canonical textual value, e.g. `"0.79"`, `"1"`, or `"1-x"`
    Value(String),
    /// No coefficient was supplied for this ion
    Unknown,
}

impl Coefficient {
    pub fn implicit() -> Self {
        Coefficient::Value(DEFAULT_COEFFICIENT.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Coefficient::Value(s) => Some(s),
            Coefficient::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Coefficient::Unknown)
    }
}

impl Serialize for Coefficient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coefficient::Value(s) => serializer.serialize_str(s),
            Coefficient::Unknown => serializer.serialize_none(),
        }
    }
}

// ── Public API ────────────────────────────────────────────

/// Replace comma decimal separators with points
pub fn decimal_point(s: &str) -> String {
    s.replace(',', ".")
}

/// Whether a cleaned text means "no value"
pub fn is_sentinel(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case(NAN_TEXT)
}

/// Clean a free-text scalar (composition estimate, sample type, dimensionality)
pub fn clean_text(raw: &RawValue) -> String {
    raw.text().trim().to_string()
}

/// Clean a free-text scalar, mapping sentinel values to `None`
pub fn clean_optional_text(raw: &RawValue) -> Option<String> {
    let text = clean_text(raw);
    if is_sentinel(&text) {
        None
    } else {
        Some(text)
    }
}

/// Clean an ion or additive abbreviation.
///
/// Surrounding whitespace is removed and one enclosing parenthesis pair is
/// unwrapped: `" (MA) "` → `"MA"`. Case is preserved.
pub fn clean_abbreviation(raw: &RawValue) -> String {
    let text = raw.text();
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    inner.trim().to_string()
}

/// Clean a coefficient for an ion that is present.
///
/// Empty input takes the default `"1"`, commas become points, and anything
/// else is kept as written; coefficients are never parsed. The literal
/// `"nan"` reads as [`Coefficient::Unknown`].
pub fn clean_coefficient(raw: &RawValue) -> Coefficient {
    let text = raw.text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Coefficient::implicit();
    }
    if trimmed.eq_ignore_ascii_case(NAN_TEXT) {
        return Coefficient::Unknown;
    }
    Coefficient::Value(decimal_point(trimmed))
}

/// Parse a concentration or mass fraction.
///
/// Returns `f64::NAN` when the value is empty, malformed, or not finite.
pub fn parse_quantity(raw: &RawValue) -> f64 {
    parse_number(raw).unwrap_or(f64::NAN)
}

/// Parse a band gap.
///
/// Returns `None` when the value is empty, malformed, or not finite.
pub fn parse_band_gap(raw: &RawValue) -> Option<f64> {
    parse_number(raw)
}

/// Whether a parsed quantity carries the NaN marker
pub fn is_missing_quantity(value: &f64) -> bool {
    !value.is_finite()
}

fn parse_number(raw: &RawValue) -> Option<f64> {
    if let RawValue::Number(n) = raw {
        return n.as_f64().filter(|v| v.is_finite());
    }
    let text = decimal_point(&raw.text());
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

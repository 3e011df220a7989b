//! Additive list processor - additives and impurities
//!
//! Works like the ion list processor on (abbreviation, concentration,
//! mass fraction) triples, with two differences: missing quantities become
//! the NaN marker instead of a default, and the input order is kept.

use std::fmt;

use serde::Serialize;

use crate::enrichment::Enrichment;
use crate::input::RawValue;
use crate::normalizer::{clean_abbreviation, is_missing_quantity, is_sentinel, parse_quantity};
use crate::reference::Lookup;
use crate::{Error, Result};

/// Which list the entries belong to; both share one reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditiveKind {
    Additive,
    Impurity,
}

impl AdditiveKind {
    /// Prefix of the input keys (`additives_concentrations`, …)
    pub fn prefix(self) -> &'static str {
        match self {
            AdditiveKind::Additive => "additives",
            AdditiveKind::Impurity => "impurities",
        }
    }
}

impl fmt::Display for AdditiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// One additive or impurity; quantities hold `f64::NAN` when unknown
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveEntry {
    pub abbreviation: String,
    pub concentration: f64,
    pub mass_fraction: f64,
}

/// Normalized additives or impurities, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveList {
    kind: AdditiveKind,
    entries: Vec<AdditiveEntry>,
}

impl AdditiveList {
    /// Normalize raw triples.
    ///
    /// # Errors
    /// Returns `LengthMismatch` when the concentration or mass-fraction
    /// list is longer than the abbreviation list.
    pub fn from_raw(
        kind: AdditiveKind,
        abbreviations: &[RawValue],
        concentrations: &[RawValue],
        mass_fractions: &[RawValue],
    ) -> Result<Self> {
        for (suffix, values) in [("concentrations", concentrations), ("mass_fractions", mass_fractions)] {
            if values.len() > abbreviations.len() {
                return Err(Error::LengthMismatch {
                    list: format!("{}_{}", kind.prefix(), suffix),
                    values: values.len(),
                    abbreviations: abbreviations.len(),
                });
            }
        }

        let quantity = |values: &[RawValue], i: usize| values.get(i).map(parse_quantity).unwrap_or(f64::NAN);

        let entries = abbreviations
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let abbreviation = clean_abbreviation(raw);
                if is_sentinel(&abbreviation) {
                    return None;
                }
                Some(AdditiveEntry {
                    abbreviation,
                    concentration: quantity(concentrations, i),
                    mass_fraction: quantity(mass_fractions, i),
                })
            })
            .collect();

        Ok(Self { kind, entries })
    }

    pub fn kind(&self) -> AdditiveKind {
        self.kind
    }

    pub fn entries(&self) -> &[AdditiveEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach reference metadata to every entry, preserving order
    pub fn enrich(&self, table: &impl Lookup) -> Vec<AdditiveRecord> {
        self.entries
            .iter()
            .map(|entry| AdditiveRecord {
                abbreviation: entry.abbreviation.clone(),
                concentration: entry.concentration,
                mass_fraction: entry.mass_fraction,
                enrichment: Enrichment::lookup(table, &entry.abbreviation),
            })
            .collect()
    }
}

/// Enriched additive or impurity as it appears in the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditiveRecord {
    pub abbreviation: String,
    #[serde(skip_serializing_if = "is_missing_quantity")]
    pub concentration: f64,
    #[serde(skip_serializing_if = "is_missing_quantity")]
    pub mass_fraction: f64,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

//! Ion list processor - one crystallographic site (A, B or X)
//!
//! Raw parallel lists are zipped into [`SiteEntry`] values as soon as their
//! lengths have been checked, so no ragged list leaves this module.
//!
//! # Steps
//!
//! 1. Clean abbreviations (trim, unwrap one `( … )` pair); blank and `nan`
//!    ones are dropped together with their coefficient
//! 2. Pad missing coefficients with [`Coefficient::Unknown`], default empty
//!    ones to `"1"`, convert decimal commas
//! 3. Stable sort by abbreviation (code-point order)
//! 4. Enrich each entry from the site's reference table

use std::fmt;

use serde::Serialize;

use crate::enrichment::Enrichment;
use crate::input::RawValue;
use crate::normalizer::{clean_abbreviation, clean_coefficient, is_sentinel, Coefficient};
use crate::reference::{Lookup, ReferenceData, ReferenceTable};
use crate::{Error, Result};

/// Ion position in the ABX₃ structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Site {
    A,
    B,
    X,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::A, Site::B, Site::X];

    /// Lower-case prefix used by the input keys (`a_coefficients`, …)
    pub fn prefix(self) -> &'static str {
        match self {
            Site::A => "a",
            Site::B => "b",
            Site::X => "x",
        }
    }

    /// Reference table enriching this site
    pub fn table(self, data: &ReferenceData) -> &ReferenceTable {
        match self {
            Site::A => &data.a_ions,
            Site::B => &data.b_ions,
            Site::X => &data.x_ions,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::A => f.write_str("A"),
            Site::B => f.write_str("B"),
            Site::X => f.write_str("X"),
        }
    }
}

/// One ion with its coefficient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    pub abbreviation: String,
    pub coefficient: Coefficient,
}

impl SiteEntry {
    pub fn new(abbreviation: impl Into<String>, coefficient: Coefficient) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            coefficient,
        }
    }
}

/// Normalized, sorted ions of one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionSite {
    site: Site,
    entries: Vec<SiteEntry>,
}

impl CompositionSite {
    /// Normalize the raw lists of one site.
    ///
    /// # Errors
    /// Returns `LengthMismatch` when there are more coefficients than
    /// abbreviations. Fewer coefficients are padded, never an error.
    pub fn from_raw(site: Site, abbreviations: &[RawValue], coefficients: &[RawValue]) -> Result<Self> {
        if coefficients.len() > abbreviations.len() {
            return Err(Error::LengthMismatch {
                list: format!("{}_coefficients", site.prefix()),
                values: coefficients.len(),
                abbreviations: abbreviations.len(),
            });
        }

        let entries = abbreviations
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let abbreviation = clean_abbreviation(raw);
                if is_sentinel(&abbreviation) {
                    return None;
                }
                let coefficient = coefficients
                    .get(i)
                    .map(clean_coefficient)
                    .unwrap_or(Coefficient::Unknown);
                Some(SiteEntry::new(abbreviation, coefficient))
            })
            .collect();

        Ok(Self::from_entries(site, entries))
    }

    /// Build a site from already clean entries; entries are sorted here
    pub fn from_entries(site: Site, mut entries: Vec<SiteEntry>) -> Self {
        sort_entries(&mut entries);
        for pair in entries.windows(2) {
            if pair[0].abbreviation == pair[1].abbreviation {
                log::warn!(
                    "{}-site lists '{}' more than once; entries are kept separately",
                    site,
                    pair[0].abbreviation
                );
            }
        }
        Self { site, entries }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn abbreviations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.abbreviation.as_str()).collect()
    }

    pub fn coefficients(&self) -> Vec<&Coefficient> {
        self.entries.iter().map(|e| &e.coefficient).collect()
    }

    /// Attach reference metadata to every ion, preserving order
    pub fn enrich(&self, table: &impl Lookup) -> Vec<IonRecord> {
        self.entries
            .iter()
            .map(|entry| IonRecord {
                abbreviation: entry.abbreviation.clone(),
                coefficient: entry.coefficient.clone(),
                enrichment: Enrichment::lookup(table, &entry.abbreviation),
            })
            .collect()
    }
}

/// Sort entries by abbreviation; coefficients travel with their ion and
/// equal abbreviations keep their input order.
pub fn sort_entries(entries: &mut [SiteEntry]) {
    entries.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
}

/// Enriched ion as it appears in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IonRecord {
    pub abbreviation: String,
    #[serde(skip_serializing_if = "Coefficient::is_unknown")]
    pub coefficient: Coefficient,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

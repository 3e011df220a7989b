//! Perovskite Core - canonical records for perovskite compositions
//!
//! Turns loosely formatted, user-entered composition data into one
//! deterministic JSON record enriched with reference metadata.
//!
//! # Architecture
//!
//! ```text
//! RawComposition → normalize → Composition → formula
//!                                   ↓
//!                    ReferenceData → enrich → PerovskiteRecord → Document (JSON)
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input and tables always produce identical output
//! - **Total normalization**: malformed numbers and unknown ions never fail;
//!   they fall back to documented defaults
//! - **Pruned**: the document never carries empty strings, `"nan"`, or
//!   non-finite numbers
//! - **Explicit data origin**: reference tables are passed in, never
//!   looked up from global state

pub mod additive;
pub mod enrichment;
pub mod error;
pub mod formula;
pub mod input;
pub mod normalizer;
pub mod record;
pub mod reference;
pub mod site;
pub mod vocabulary;

pub use additive::{AdditiveKind, AdditiveList, AdditiveRecord};
pub use error::{Error, Result};
pub use formula::Formula;
pub use input::{RawComposition, RawValue};
pub use normalizer::Coefficient;
pub use record::{Document, PerovskiteRecord, SCHEMA_ID};
pub use reference::{Lookup, Origin, ReferenceData, ReferenceTable};
pub use site::{CompositionSite, IonRecord, Site};

use normalizer::{clean_optional_text, parse_band_gap};

/// A normalized composition, before enrichment.
///
/// Everything here is derived from user input alone; the reference tables
/// are only needed by [`Composition::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub composition_estimate: Option<String>,
    pub sample_type: Option<String>,
    pub dimensionality: Option<String>,
    /// `None` when the band gap was empty or malformed
    pub band_gap: Option<f64>,
    pub a_site: CompositionSite,
    pub b_site: CompositionSite,
    pub x_site: CompositionSite,
    pub additives: AdditiveList,
    pub impurities: AdditiveList,
}

impl Composition {
    /// Normalize every field of a raw composition
    ///
    /// # Errors
    /// Returns `LengthMismatch` when a value list is longer than its
    /// abbreviation list. Malformed values are never errors.
    pub fn normalize(raw: &RawComposition) -> Result<Self> {
        Ok(Self {
            composition_estimate: clean_optional_text(&raw.composition_estimate),
            sample_type: clean_optional_text(&raw.sample_type),
            dimensionality: clean_optional_text(&raw.dimensionality),
            band_gap: parse_band_gap(&raw.bandgap),
            a_site: CompositionSite::from_raw(Site::A, &raw.a_ions_abbreviations, &raw.a_coefficients)?,
            b_site: CompositionSite::from_raw(Site::B, &raw.b_ions_abbreviations, &raw.b_coefficients)?,
            x_site: CompositionSite::from_raw(Site::X, &raw.x_ions_abbreviations, &raw.x_coefficients)?,
            additives: AdditiveList::from_raw(
                AdditiveKind::Additive,
                &raw.additives_abbreviations,
                &raw.additives_concentrations,
                &raw.additives_mass_fractions,
            )?,
            impurities: AdditiveList::from_raw(
                AdditiveKind::Impurity,
                &raw.impurities_abbreviations,
                &raw.impurities_concentrations,
                &raw.impurities_mass_fractions,
            )?,
        })
    }

    /// The three sites in A, B, X order
    pub fn sites(&self) -> [&CompositionSite; 3] {
        [&self.a_site, &self.b_site, &self.x_site]
    }

    /// Short and long composition strings
    pub fn formula(&self) -> Formula {
        Formula::compose(&self.sites())
    }

    /// Enrich against the reference tables and build the final document
    pub fn assemble(&self, reference: &ReferenceData) -> Document {
        let formula = self.formula();
        let record = PerovskiteRecord {
            long_form: non_empty(formula.long_form),
            short_form: non_empty(formula.short_form),
            composition_estimate: self.composition_estimate.clone(),
            sample_type: self.sample_type.clone(),
            dimensionality: self.dimensionality.clone(),
            band_gap: self.band_gap,
            ions_a_site: self.a_site.enrich(Site::A.table(reference)),
            ions_b_site: self.b_site.enrich(Site::B.table(reference)),
            ions_x_site: self.x_site.enrich(Site::X.table(reference)),
            additives: self.additives.enrich(&reference.additives),
            impurities: self.impurities.enrich(&reference.additives),
            ..PerovskiteRecord::default()
        };
        Document::new(record)
    }
}

/// Run the whole pipeline on one raw composition
///
/// # Errors
/// Only structural input errors (see [`Composition::normalize`]).
pub fn convert(raw: &RawComposition, reference: &ReferenceData) -> Result<Document> {
    let composition = Composition::normalize(raw)?;
    Ok(composition.assemble(reference))
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

//! Descriptive fields copied from a reference table onto a record

use serde::Serialize;

use crate::reference::{Column, Lookup};

/// Reference metadata for one abbreviation.
///
/// Every field is optional: an abbreviation missing from the table, or a
/// blank cell, leaves the field `None` and the key out of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_compound_smiles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_compound_iupac_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_compound_cas_number: Option<String>,
}

impl Enrichment {
    /// Collect every descriptive column for `abbreviation` from `table`
    pub fn lookup(table: &impl Lookup, abbreviation: &str) -> Self {
        let get = |column: Column| table.lookup(abbreviation, column).map(str::to_string);
        let enrichment = Self {
            molecular_formula: get(Column::MolecularFormula),
            smiles: get(Column::Smiles),
            common_name: get(Column::CommonName),
            iupac_name: get(Column::IupacName),
            cas_number: get(Column::Cas),
            source_compound_smiles: get(Column::ParentSmiles),
            source_compound_iupac_name: get(Column::ParentIupac),
            source_compound_cas_number: get(Column::ParentCas),
        };
        if enrichment.is_empty() {
            log::debug!("no reference data for '{}'", abbreviation);
        }
        enrichment
    }

    /// True when no field was found
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

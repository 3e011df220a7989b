//! Standard option lists offered to users when entering a composition
//!
//! These are suggestions for an input collector's drop-downs. The
//! pipeline accepts any text; nothing here is used for validation.

use crate::reference::ReferenceTable;
use crate::site::Site;

pub const COMPOSITION_ESTIMATES: &[&str] = &[
    "Estimated from precursor solutions",
    "Literature value",
    "Estimated from XRD data",
    "Estimated from spectroscopic data",
    "Theoretical simulation",
    "Hypothetical compound",
    "Other",
];

pub const DIMENSIONALITIES: &[&str] = &["0D", "1D", "2D", "3D", "2D/3D", "Unknown"];

pub const SAMPLE_TYPES: &[&str] = &[
    "Polycrystalline film",
    "Single crystal",
    "Quantum dots",
    "Nano rods",
    "Colloidal solution",
    "Other",
];

pub const ADDITIVE_TYPES: &[&str] = &["Additive", "Impurity", "Dopant", "Secondary phase", "Other"];

pub const CONCENTRATION_METRICS: &[&str] = &["mol %", "wt %", "vol %", "mol/dm^3", "Other"];

/// Most common ions of a site, listed ahead of the table contents
pub fn common_ions(site: Site) -> &'static [&'static str] {
    match site {
        Site::A => &["Cs", "FA", "MA"],
        Site::B => &["Pb", "Sn"],
        Site::X => &["Br", "I"],
    }
}

/// Options for a site: the common ions, then every table abbreviation
pub fn site_options(site: Site, table: &ReferenceTable) -> Vec<String> {
    common_ions(site)
        .iter()
        .map(|s| s.to_string())
        .chain(table.abbreviations())
        .collect()
}

/// Options for additives and impurities: every table abbreviation
pub fn additive_options(table: &ReferenceTable) -> Vec<String> {
    table.abbreviations()
}

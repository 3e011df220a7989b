//! Formula composer - short and long composition strings
//!
//! Sites are concatenated in A, B, X order with no separators. Symbols
//! longer than two characters are parenthesized so that molecular ions
//! read as one unit: `Cs`, `Pb` and `I` stay bare, `PEA` becomes `(PEA)`.
//!
//! ```text
//! A: Cs 0.05, FA 0.16, MA 0.79   B: Pb 1   X: Br 0.5, I 2.5
//! short form: CsFAMAPbBrI
//! long form:  Cs0.05FA0.16MA0.79PbBr0.5I2.5
//! ```

use std::borrow::Cow;

use serde::Serialize;

use crate::normalizer::{Coefficient, DEFAULT_COEFFICIENT};
use crate::site::CompositionSite;

/// Symbols longer than this are wrapped in parentheses
pub const BARE_SYMBOL_MAX_LEN: usize = 2;

/// Rendering of an unknown coefficient
pub const UNKNOWN_COEFFICIENT: &str = "x";

/// The two composition strings of one perovskite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formula {
    pub short_form: String,
    pub long_form: String,
}

impl Formula {
    /// Compose both forms from sites given in A, B, X order
    pub fn compose(sites: &[&CompositionSite]) -> Self {
        Self {
            short_form: short_form(sites),
            long_form: long_form(sites),
        }
    }
}

/// Parenthesize `abbreviation` when it is longer than two characters
pub fn wrap(abbreviation: &str) -> Cow<'_, str> {
    if abbreviation.chars().count() > BARE_SYMBOL_MAX_LEN {
        Cow::Owned(format!("({})", abbreviation))
    } else {
        Cow::Borrowed(abbreviation)
    }
}

/// Family string: the wrapped symbols, no coefficients
pub fn short_form(sites: &[&CompositionSite]) -> String {
    let mut out = String::new();
    for site in sites {
        for entry in site.entries() {
            out.push_str(&wrap(&entry.abbreviation));
        }
    }
    out
}

/// Stoichiometric string: each wrapped symbol followed by its coefficient
pub fn long_form(sites: &[&CompositionSite]) -> String {
    let mut out = String::new();
    for site in sites {
        for entry in site.entries() {
            out.push_str(&wrap(&entry.abbreviation));
            out.push_str(coefficient_suffix(&entry.coefficient));
        }
    }
    out
}

/// Text written after a symbol: nothing for exactly `"1"`, `x` for unknown
fn coefficient_suffix(coefficient: &Coefficient) -> &str {
    match coefficient {
        Coefficient::Value(v) if v == DEFAULT_COEFFICIENT => "",
        Coefficient::Value(v) => v,
        Coefficient::Unknown => UNKNOWN_COEFFICIENT,
    }
}

//! Named constants that are always bound during evaluation.

use std::f64::consts;

/// The constants available in every expression, by name.
pub const CONSTANTS: [(&str, f64); 2] = [
    ("pi", consts::PI),
    ("e", consts::E),
];

/// Returns true if the given name refers to a constant.
pub fn is_constant(name: &str) -> bool {
    CONSTANTS.iter().any(|(n, _)| *n == name)
}

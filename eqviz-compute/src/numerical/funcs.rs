//! The builtin functions that can be called in an expression.
//!
//! Every function takes exactly one argument. The domain of each function is checked before it is
//! applied, so a call outside the domain is reported as an error instead of silently producing
//! `NaN`.

use crate::numerical::error::EvalError;
use levenshtein::levenshtein;

/// The set of real inputs a builtin function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Every real number.
    All,

    /// Strictly positive numbers, such as for `log`.
    Positive,

    /// Non-negative numbers, such as for `sqrt`.
    NonNegative,

    /// Numbers in `[-1, 1]`, such as for `asin`.
    UnitInterval,
}

impl Domain {
    /// Returns true if the value lies in the domain.
    pub fn contains(self, value: f64) -> bool {
        match self {
            Domain::All => true,
            Domain::Positive => value > 0.0,
            Domain::NonNegative => value >= 0.0,
            Domain::UnitInterval => (-1.0..=1.0).contains(&value),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::All => write!(f, "any real number"),
            Domain::Positive => write!(f, "a positive number"),
            Domain::NonNegative => write!(f, "a non-negative number"),
            Domain::UnitInterval => write!(f, "a number between -1 and 1"),
        }
    }
}

/// A builtin function of one real argument.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The name used to call the function.
    pub name: &'static str,

    /// The inputs the function accepts.
    pub domain: Domain,

    /// Applies the function to an argument in its domain.
    apply: fn(f64) -> f64,
}

impl Builtin {
    /// The number of arguments every builtin function takes.
    pub const ARITY: usize = 1;

    /// Calls the function with the given argument, checking its domain first.
    pub fn call(&self, arg: f64) -> Result<f64, EvalError> {
        if !self.domain.contains(arg) {
            return Err(EvalError::Domain {
                name: self.name,
                arg,
                domain: self.domain,
            });
        }

        Ok((self.apply)(arg))
    }
}

/// All builtin functions.
pub const BUILTINS: [Builtin; 13] = [
    Builtin { name: "sin", domain: Domain::All, apply: f64::sin },
    Builtin { name: "cos", domain: Domain::All, apply: f64::cos },
    Builtin { name: "tan", domain: Domain::All, apply: f64::tan },
    Builtin { name: "asin", domain: Domain::UnitInterval, apply: f64::asin },
    Builtin { name: "acos", domain: Domain::UnitInterval, apply: f64::acos },
    Builtin { name: "atan", domain: Domain::All, apply: f64::atan },
    Builtin { name: "sinh", domain: Domain::All, apply: f64::sinh },
    Builtin { name: "cosh", domain: Domain::All, apply: f64::cosh },
    Builtin { name: "tanh", domain: Domain::All, apply: f64::tanh },
    Builtin { name: "log", domain: Domain::Positive, apply: f64::ln },
    Builtin { name: "sqrt", domain: Domain::NonNegative, apply: f64::sqrt },
    Builtin { name: "exp", domain: Domain::All, apply: f64::exp },
    Builtin { name: "abs", domain: Domain::All, apply: f64::abs },
];

/// Returns the builtin function with the given name.
pub fn get(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Returns the names of all builtin functions with a name similar to the given name.
pub fn similar(name: &str) -> Vec<String> {
    BUILTINS
        .iter()
        .filter(|builtin| levenshtein(builtin.name, name) < 2)
        .map(|builtin| builtin.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use eqviz_parser::normalize::KNOWN_FUNCTIONS;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn every_known_function_is_builtin() {
        for name in KNOWN_FUNCTIONS {
            assert!(get(name).is_some(), "`{}` has no builtin", name);
        }
        assert_eq!(BUILTINS.len(), KNOWN_FUNCTIONS.len());
    }

    #[test]
    fn call_in_domain() {
        assert_float_absolute_eq!(get("sqrt").unwrap().call(16.0).unwrap(), 4.0);
        assert_float_absolute_eq!(get("log").unwrap().call(std::f64::consts::E).unwrap(), 1.0);
        assert_float_absolute_eq!(get("asin").unwrap().call(1.0).unwrap(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn call_outside_domain() {
        assert!(get("log").unwrap().call(0.0).is_err());
        assert!(get("sqrt").unwrap().call(-1.0).is_err());
        assert!(get("acos").unwrap().call(1.5).is_err());
    }

    #[test]
    fn suggestions() {
        assert_eq!(similar("sine"), vec!["sin".to_string()]);
        assert!(similar("foo").is_empty());
    }
}

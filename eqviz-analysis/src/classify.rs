//! The second derivative test.

use crate::{bindings, derivatives::DerivativeSet};
use eqviz_compute::{evaluate, ParsedExpression};
use std::fmt;

/// The kind of a critical point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    Minimum,
    Maximum,
    Saddle,

    /// The test was inconclusive, or a second derivative is missing or undefined at the point.
    Unknown,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Minimum => write!(f, "minimum"),
            Self::Maximum => write!(f, "maximum"),
            Self::Saddle => write!(f, "saddle point"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classifies points with the second partial derivatives of an expression, parsed once up front.
#[derive(Debug)]
pub struct Classifier {
    second: Option<[ParsedExpression; 3]>,
}

impl Classifier {
    /// Parses `fxx`, `fyy`, and `fxy` from the set.
    pub fn new(derivatives: &DerivativeSet) -> Self {
        let second = DerivativeSet::parse(&derivatives.fxx)
            .zip(DerivativeSet::parse(&derivatives.fyy))
            .zip(DerivativeSet::parse(&derivatives.fxy))
            .map(|((fxx, fyy), fxy)| [fxx, fyy, fxy]);
        Self { second }
    }

    /// Classifies the point `(x, y)` with the discriminant `D = fxx * fyy - fxy^2`.
    pub fn classify(&self, x: f64, y: f64) -> PointKind {
        let Some([fxx, fyy, fxy]) = &self.second else {
            return PointKind::Unknown;
        };

        let vars = bindings(x, y);
        let fxx = evaluate(fxx, &vars);
        let fyy = evaluate(fyy, &vars);
        let fxy = evaluate(fxy, &vars);
        let d = fxx * fyy - fxy * fxy;
        if !d.is_finite() {
            return PointKind::Unknown;
        }

        if d > 0.0 {
            if fxx > 0.0 {
                PointKind::Minimum
            } else {
                PointKind::Maximum
            }
        } else if d < 0.0 {
            PointKind::Saddle
        } else {
            PointKind::Unknown
        }
    }
}

/// Classifies the point `(x, y)` with the second derivative test.
///
/// Returns [`PointKind::Unknown`] if `fxx`, `fyy`, or `fxy` is absent, if any of them is not a
/// finite number at the point, or if the discriminant is zero.
pub fn classify(derivatives: &DerivativeSet, x: f64, y: f64) -> PointKind {
    Classifier::new(derivatives).classify(x, y)
}

#[cfg(test)]
mod tests {
    use crate::derivatives::derive;
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn kind(expr: &str, x: f64, y: f64) -> PointKind {
        classify(&derive(&parse(expr)), x, y)
    }

    #[test]
    fn minimum_maximum_saddle() {
        assert_eq!(kind("x^2 + y^2", 0.0, 0.0), PointKind::Minimum);
        assert_eq!(kind("-x^2 - y^2", 0.0, 0.0), PointKind::Maximum);
        assert_eq!(kind("x^2 - y^2", 0.0, 0.0), PointKind::Saddle);
        assert_eq!(kind("x*y", 0.0, 0.0), PointKind::Saddle);
    }

    #[test]
    fn zero_discriminant() {
        assert_eq!(kind("x^4 + y^4", 0.0, 0.0), PointKind::Unknown);
        assert_eq!(kind("x^2 + y", 0.0, 0.0), PointKind::Unknown);
    }

    #[test]
    fn missing_second_derivatives() {
        assert_eq!(kind("x^2", 0.0, 0.0), PointKind::Unknown);
        assert_eq!(classify(&DerivativeSet::default(), 0.0, 0.0), PointKind::Unknown);
    }

    #[test]
    fn undefined_second_derivative() {
        // fxx = -x^-2 is undefined at x = 0
        assert_eq!(kind("log(x) + y^2", 0.0, 0.0), PointKind::Unknown);
        assert_eq!(kind("log(x) + y^2", 1.0, 0.0), PointKind::Saddle);
    }
}

//! Qualitative properties of an expression: its family, symmetry, continuity, domain, and
//! periodicity.
//!
//! These are heuristics. The family and periodicity look at the normalized text, so `asin(x)`
//! counts as trigonometric and `sinh(x)` as periodic.

use crate::bindings;
use eqviz_compute::{
    evaluate,
    symbolic::{simplify, Primary, SymExpr},
    ParsedExpression,
};
use std::{collections::BTreeSet, fmt};

/// The broad family an expression belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    Trigonometric,
    Exponential,
    Logarithmic,
    Polynomial,
    General,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Trigonometric => write!(f, "Trigonometric"),
            Self::Exponential => write!(f, "Exponential"),
            Self::Logarithmic => write!(f, "Logarithmic"),
            Self::Polynomial => write!(f, "Polynomial"),
            Self::General => write!(f, "General"),
        }
    }
}

fn is_trigonometric(text: &str) -> bool {
    ["sin", "cos", "tan"].iter().any(|name| text.contains(name))
}

fn is_exponential(text: &str) -> bool {
    text.contains("exp")
}

fn is_logarithmic(text: &str) -> bool {
    text.contains("log")
}

fn is_polynomial(text: &str) -> bool {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| c.is_ascii_digit() || ".+-*/^xy()".contains(c))
}

/// Rules deciding the [`Family`] of the normalized text. The first rule that matches wins; if none
/// do, the family is [`Family::General`].
pub const FAMILY_RULES: [(Family, fn(&str) -> bool); 4] = [
    (Family::Trigonometric, is_trigonometric),
    (Family::Exponential, is_exponential),
    (Family::Logarithmic, is_logarithmic),
    (Family::Polynomial, is_polynomial),
];

/// Returns the family of the normalized text of an expression.
pub fn family_of(text: &str) -> Family {
    FAMILY_RULES.iter()
        .find(|(_, rule)| rule(text))
        .map_or(Family::General, |(family, _)| *family)
}

/// Whether `f(-x) = f(x)` or `f(-x) = -f(x)`, checked numerically at `x = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symmetry {
    Even,
    Odd,
    NoObvious,

    /// The expression does not have `x` as its only variable.
    Unchecked,
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Even => write!(f, "Even function"),
            Self::Odd => write!(f, "Odd function"),
            Self::NoObvious => write!(f, "No obvious symmetry"),
            Self::Unchecked => write!(f, "Not checked"),
        }
    }
}

const SYMMETRY_TOLERANCE: f64 = 1e-10;

fn symmetry_of(expr: &ParsedExpression) -> Symmetry {
    if expr.variables.len() != 1 || !expr.has_variable("x") {
        return Symmetry::Unchecked;
    }

    let at = |x: f64| evaluate(expr, &bindings(x, 0.0));
    let (pos, neg) = (at(1.0), at(-1.0));
    if !pos.is_finite() || !neg.is_finite() {
        Symmetry::NoObvious
    } else if (pos - neg).abs() < SYMMETRY_TOLERANCE {
        Symmetry::Even
    } else if (pos + neg).abs() < SYMMETRY_TOLERANCE {
        Symmetry::Odd
    } else {
        Symmetry::NoObvious
    }
}

/// Returns true if the expression depends on any of the variables.
fn depends_on(expr: &SymExpr, variables: &BTreeSet<String>) -> bool {
    variables.iter().any(|var| expr.contains_symbol(var))
}

/// If the subexpression divides by something that depends on a variable, returns the divisor.
fn divisor<'a>(expr: &'a SymExpr, variables: &BTreeSet<String>) -> Option<&'a SymExpr> {
    match expr {
        SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| n < 0.0) && depends_on(base, variables) => Some(&**base),
        _ => None,
    }
}

/// If the subexpression is a call to one of the given functions, returns its argument.
fn call_arg<'a>(expr: &'a SymExpr, names: &[&str]) -> Option<&'a SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) if names.contains(&name.as_str()) => args.first(),
        _ => None,
    }
}

fn continuity_of(expr: &ParsedExpression) -> String {
    let discontinuous = expr.tree.post_order_iter()
        .any(|sub| divisor(sub, &expr.variables).is_some() || call_arg(sub, &["tan", "log"]).is_some());
    if discontinuous {
        "May have discontinuities".to_string()
    } else {
        "Continuous everywhere".to_string()
    }
}

/// Lists the conditions the variables must satisfy for the expression to be defined, in the order
/// they are found and without duplicates.
fn domain_restrictions(expr: &ParsedExpression) -> Vec<String> {
    let mut restrictions = Vec::<String>::new();
    for sub in expr.tree.post_order_iter() {
        let restriction = if let Some(arg) = call_arg(sub, &["log"]) {
            format!("{} > 0 (logarithms require positive arguments)", arg)
        } else if let Some(arg) = call_arg(sub, &["sqrt"]) {
            format!("{} >= 0 (square roots require non-negative arguments)", arg)
        } else if let Some(arg) = call_arg(sub, &["asin", "acos"]) {
            format!("-1 <= {} <= 1 (inverse sine and cosine require arguments in [-1, 1])", arg)
        } else if let Some(base) = divisor(sub, &expr.variables) {
            format!("{} != 0 (denominators must not vanish)", base)
        } else {
            continue;
        };

        if !restrictions.contains(&restriction) {
            restrictions.push(restriction);
        }
    }
    restrictions
}

fn periodicity_of(text: &str) -> String {
    if text.contains("sin") || text.contains("cos") {
        "Likely periodic (contains trig functions)".to_string()
    } else {
        "Not obviously periodic".to_string()
    }
}

/// Returns the degree of the expression as a polynomial in `var`, or `None` if it is not one.
fn degree_in(expr: &SymExpr, var: &str) -> Option<u32> {
    if !expr.contains_symbol(var) {
        return Some(0);
    }

    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => Some(1),
        SymExpr::Primary(_) => None,
        SymExpr::Add(terms) => terms.iter()
            .map(|term| degree_in(term, var))
            .try_fold(0, |max, degree| Some(max.max(degree?))),
        SymExpr::Mul(factors) => factors.iter()
            .map(|factor| degree_in(factor, var))
            .try_fold(0u32, |sum, degree| sum.checked_add(degree?)),
        SymExpr::Exp(base, exp) => {
            let exp = exp.as_number()?;
            if exp < 0.0 || exp.fract() != 0.0 || exp > u32::MAX as f64 {
                return None;
            }
            degree_in(base, var)?.checked_mul(exp as u32)
        },
    }
}

/// The degree of a polynomial in a single variable, after light simplification.
fn degree_of(expr: &ParsedExpression, family: Family) -> Option<u32> {
    if expr.variables.len() != 1 || family != Family::Polynomial {
        return None;
    }
    let var = expr.variables.first()?;
    degree_in(&simplify(&expr.tree), var)
}

/// Where an expression is defined.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainInfo {
    /// Conditions the variables must satisfy, in the order they appear in the expression.
    pub restrictions: Vec<String>,
}

impl DomainInfo {
    /// Returns true if the expression is defined for every real input.
    pub fn is_unrestricted(&self) -> bool {
        self.restrictions.is_empty()
    }
}

/// General properties of an expression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionProperties {
    pub family: Family,

    /// The free variables, sorted.
    pub variables: Vec<String>,

    /// The number of free variables.
    pub dimension: usize,

    /// The degree of a polynomial in one variable.
    pub degree: Option<u32>,

    pub symmetry: Symmetry,
    pub continuity: String,

    pub domain: DomainInfo,

    pub periodicity: String,
}

/// Analyzes the general properties of the expression.
///
/// An invalid expression is of the [`Family::General`] family, has no variables, and is otherwise
/// treated like the constant zero.
pub fn analyze_properties(expr: &ParsedExpression) -> FunctionProperties {
    let family = if expr.is_valid {
        family_of(&expr.normalized)
    } else {
        Family::General
    };

    FunctionProperties {
        family,
        variables: expr.variables.iter().cloned().collect(),
        dimension: expr.variables.len(),
        degree: degree_of(expr, family),
        symmetry: symmetry_of(expr),
        continuity: continuity_of(expr),
        domain: DomainInfo { restrictions: domain_restrictions(expr) },
        periodicity: periodicity_of(&expr.normalized),
    }
}

#[cfg(test)]
mod tests {
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn properties(expr: &str) -> FunctionProperties {
        analyze_properties(&parse(expr))
    }

    #[test]
    fn families() {
        assert_eq!(family_of("sin(x)*cos(y)"), Family::Trigonometric);
        assert_eq!(family_of("exp(x)"), Family::Exponential);
        assert_eq!(family_of("log(x)+x^2"), Family::Logarithmic);
        assert_eq!(family_of("x^2 + 3*x*y - 1.5"), Family::Polynomial);
        assert_eq!(family_of("sqrt(x)"), Family::General);
        assert_eq!(family_of("x + z"), Family::General);
    }

    #[test]
    fn rule_order() {
        assert_eq!(family_of("exp(sin(x))"), Family::Trigonometric);
        assert_eq!(family_of("exp(log(x))"), Family::Exponential);
    }

    #[test]
    fn invalid_is_general() {
        let props = properties("x + (");
        assert_eq!(props.family, Family::General);
        assert_eq!(props.dimension, 0);
        assert_eq!(props.symmetry, Symmetry::Unchecked);
    }

    #[test]
    fn symmetry() {
        assert_eq!(properties("x^2").symmetry, Symmetry::Even);
        assert_eq!(properties("cos(x)").symmetry, Symmetry::Even);
        assert_eq!(properties("x^3").symmetry, Symmetry::Odd);
        assert_eq!(properties("sin(x)").symmetry, Symmetry::Odd);
        assert_eq!(properties("x^2 + x").symmetry, Symmetry::NoObvious);
        assert_eq!(properties("log(x)").symmetry, Symmetry::NoObvious);
        assert_eq!(properties("x^2 + y^2").symmetry, Symmetry::Unchecked);
        assert_eq!(properties("y^2").symmetry, Symmetry::Unchecked);
        assert_eq!(properties("5").symmetry, Symmetry::Unchecked);
    }

    #[test]
    fn variables_and_dimension() {
        let props = properties("z = sin(x) * cos(y)");
        assert_eq!(props.variables, vec!["x", "y"]);
        assert_eq!(props.dimension, 2);
        assert_eq!(props.family, Family::Trigonometric);
        assert_eq!(props.periodicity, "Likely periodic (contains trig functions)");
    }

    #[test]
    fn continuity() {
        assert_eq!(properties("x^2 + y^2").continuity, "Continuous everywhere");
        assert_eq!(properties("1 / x").continuity, "May have discontinuities");
        assert_eq!(properties("tan(x)").continuity, "May have discontinuities");
        assert_eq!(properties("log(x)").continuity, "May have discontinuities");
        assert_eq!(properties("x / 2").continuity, "Continuous everywhere");
    }

    #[test]
    fn restrictions() {
        assert!(properties("x^2 + y^2").domain.is_unrestricted());
        assert_eq!(properties("log(x) + sqrt(y) + log(x)").domain.restrictions, vec![
            "x > 0 (logarithms require positive arguments)".to_string(),
            "y >= 0 (square roots require non-negative arguments)".to_string(),
        ]);
        assert_eq!(properties("asin(x) / y").domain.restrictions, vec![
            "-1 <= x <= 1 (inverse sine and cosine require arguments in [-1, 1])".to_string(),
            "y != 0 (denominators must not vanish)".to_string(),
        ]);
    }

    #[test]
    fn degree() {
        assert_eq!(properties("x^3 + 2x - 1").degree, Some(3));
        assert_eq!(properties("(x + 1)^2 * x").degree, Some(3));
        assert_eq!(properties("y^4 / 2").degree, Some(4));
        assert_eq!(properties("x^2 - x^2 + x").degree, Some(1));
        assert_eq!(properties("1 / x").degree, None);
        assert_eq!(properties("x^0.5").degree, None);
        assert_eq!(properties("sin(x)").degree, None);
        assert_eq!(properties("x^2 + y^2").degree, None);
        assert_eq!(properties("5").degree, None);
        assert_eq!(properties("x + (").degree, None);
    }

    #[test]
    fn periodicity() {
        assert_eq!(properties("x^2").periodicity, "Not obviously periodic");
        assert_eq!(properties("cos(x) + y").periodicity, "Likely periodic (contains trig functions)");
    }
}

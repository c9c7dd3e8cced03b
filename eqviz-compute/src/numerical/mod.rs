//! Numerical evaluation of expressions.
//!
//! The [`Eval`] trait evaluates a [`SymExpr`](crate::symbolic::SymExpr) in a [`Ctxt`], keeping the
//! reason for any failure as an [`EvalError`]. The public [`evaluate`] function collapses every
//! failure to `NaN`, which is what plotting and scanning code wants.

pub mod ctxt;
pub mod error;
pub mod eval;
pub mod funcs;

use crate::parsed::ParsedExpression;
use ctxt::Ctxt;
use error::EvalError;
use eval::Eval;
use std::collections::HashMap;
use tracing::trace;

/// Evaluates the expression with the given variable bindings, keeping the reason for a failure.
/// The constants `pi` and `e` are always bound.
pub fn try_evaluate(expr: &ParsedExpression, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
    if !expr.is_valid {
        return Err(EvalError::Invalid);
    }

    expr.tree.eval(&Ctxt::with_bindings(bindings))
}

/// Evaluates the expression with the given variable bindings.
///
/// Returns `NaN` if the expression is invalid, a variable is missing from the bindings, or the
/// result is not a real number (such as `log(0)`, `sqrt(-1)`, or `1/0`). This function never
/// panics.
pub fn evaluate(expr: &ParsedExpression, bindings: &HashMap<String, f64>) -> f64 {
    try_evaluate(expr, bindings).unwrap_or_else(|err| {
        trace!(expression = %expr.normalized, %err, "evaluation failed");
        f64::NAN
    })
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(name, value)| (name.to_string(), *value)).collect()
    }

    #[test]
    fn sum_of_squares() {
        let expr = parse("x^2 + y^2");
        assert_eq!(evaluate(&expr, &bindings(&[("x", 3.0), ("y", 4.0)])), 25.0);
    }

    #[test]
    fn nan_on_failure() {
        assert!(evaluate(&parse("log(x)"), &bindings(&[("x", -1.0)])).is_nan());
        assert!(evaluate(&parse("sqrt(x)"), &bindings(&[("x", -4.0)])).is_nan());
        assert!(evaluate(&parse("1/x"), &bindings(&[("x", 0.0)])).is_nan());
        assert!(evaluate(&parse("x + y"), &bindings(&[("x", 1.0)])).is_nan());
    }

    #[test]
    fn invalid_expression() {
        let expr = parse("x + (");
        assert!(evaluate(&expr, &HashMap::new()).is_nan());
        assert_eq!(try_evaluate(&expr, &HashMap::new()), Err(EvalError::Invalid));
    }

    #[test]
    fn constants_always_bound() {
        let value = evaluate(&parse("cos(pi)"), &HashMap::new());
        assert_eq!(value, -1.0);
    }
}

//! Symbolic differentiation.
//!
//! [`derivative`] computes the partial derivative of an expression with respect to one symbol,
//! treating every other symbol as a constant. The result is built with a few trivial cleanups
//! (multiplying by zero or one, adding zero) but is otherwise unsimplified; pass it through
//! [`simplify`](crate::symbolic::simplify()) for a readable form.

mod function;

use super::expr::{Primary, SymExpr};
use thiserror::Error;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up
/// expressions and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 0.0,
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exponent) => {
            is_trivially_zero(base) && exponent.as_number().is_some_and(|n| n > 0.0)
        },
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up
/// expressions and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 1.0,
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exponent) => exponent.as_number() == Some(0.0) || is_trivially_unity(base),
        SymExpr::Add(exprs) => exprs.len() == 1 && is_trivially_unity(&exprs[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::number(0.0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // factors free of the variable have a zero derivative, so their term vanishes
        if product[derivative_index].is_free_of(with) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Derivative of `base^exp`.
///
/// - `(f^n)' = n * f^(n-1) * f'`, when `n` does not depend on the variable
/// - `(a^g)' = a^g * ln(a) * g'`, when `a` does not depend on the variable
/// - `(f^g)' = f^g * (g' * ln(f) + g * f' / f)` otherwise
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut mult_group = MultBuilder::default();

    if exp.is_free_of(with) {
        let reduced = match exp.as_number() {
            Some(n) => SymExpr::number(n - 1.0),
            None => exp.clone() + SymExpr::number(-1.0),
        };
        mult_group.mult(exp.clone());
        mult_group.mult(SymExpr::pow(base.clone(), reduced));
        mult_group.mult(derivative(base, with)?);
    } else if base.is_free_of(with) {
        mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
        if base.as_symbol() != Some("e") {
            mult_group.mult(SymExpr::call("log", base.clone()));
        }
        mult_group.mult(derivative(exp, with)?);
    } else {
        let mut log_term = MultBuilder::default();
        log_term.mult(derivative(exp, with)?);
        log_term.mult(SymExpr::call("log", base.clone()));

        let mut ratio_term = MultBuilder::default();
        ratio_term.mult(exp.clone());
        ratio_term.mult(derivative(base, with)?);
        ratio_term.mult(SymExpr::pow(base.clone(), SymExpr::number(-1.0)));

        let mut sum = SumBuilder::default();
        sum.add(log_term.into());
        sum.add(ratio_term.into());

        mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
        mult_group.mult(sum.into());
    }

    Ok(mult_group.into())
}

/// An error that can occur while computing a symbolic derivative.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolicDerivativeError {
    /// The function may be differentiable, but its derivative is not known.
    #[error("cannot differentiate the `{0}` function")]
    Unsupported(String),

    /// The provided sub-expression is not differentiable.
    #[error("`{0}` is not differentiable")]
    Undifferentiable(SymExpr),
}

/// Computes the partial derivative of the given expression with respect to the symbol `with`.
/// Returns [`Err`] if the derivative could not be symbolically computed.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if is_trivially_zero(f) {
        return Ok(SymExpr::number(0.0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Number(_)) => SymExpr::number(0.0),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                SymExpr::number(1.0)
            } else {
                SymExpr::number(0.0)
            }
        },
        SymExpr::Primary(Primary::Call(func, args)) => function::function_derivative(func, args, with)?,
        SymExpr::Add(exprs) => sum_rule(exprs, with)?,
        SymExpr::Mul(exprs) => product_rule(exprs, with)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, with)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::number(0.0))
    } else {
        Ok(expr)
    }
}

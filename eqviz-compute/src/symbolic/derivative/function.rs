//! Symbolic derivatives of the builtin functions.

use crate::symbolic::expr::SymExpr;
use super::{derivative, MultBuilder, SymbolicDerivativeError};

/// `1 - u^2`
fn one_minus_square(u: &SymExpr) -> SymExpr {
    SymExpr::number(1.0) + -SymExpr::pow(u.clone(), SymExpr::number(2.0))
}

/// `1 + u^2`
fn one_plus_square(u: &SymExpr) -> SymExpr {
    SymExpr::number(1.0) + SymExpr::pow(u.clone(), SymExpr::number(2.0))
}

/// Computes the derivative of a builtin function call and applies the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let [u] = args else {
        return Err(SymbolicDerivativeError::Undifferentiable(SymExpr::Primary(
            crate::symbolic::expr::Primary::Call(func.to_string(), args.to_vec()),
        )));
    };

    // d/du of the outer function, evaluated at `u`
    let outer = match func {
        "sin" => SymExpr::call("cos", u.clone()),
        "cos" => -SymExpr::call("sin", u.clone()),
        "tan" => SymExpr::pow(SymExpr::call("cos", u.clone()), SymExpr::number(-2.0)),
        "asin" => SymExpr::pow(one_minus_square(u), SymExpr::number(-0.5)),
        "acos" => -SymExpr::pow(one_minus_square(u), SymExpr::number(-0.5)),
        "atan" => SymExpr::pow(one_plus_square(u), SymExpr::number(-1.0)),
        "sinh" => SymExpr::call("cosh", u.clone()),
        "cosh" => SymExpr::call("sinh", u.clone()),
        "tanh" => SymExpr::pow(SymExpr::call("cosh", u.clone()), SymExpr::number(-2.0)),
        "log" => SymExpr::pow(u.clone(), SymExpr::number(-1.0)),
        "exp" => SymExpr::call("exp", u.clone()),
        "sqrt" => SymExpr::number(0.5) * SymExpr::pow(SymExpr::call("sqrt", u.clone()), SymExpr::number(-1.0)),
        // the sign of `u`, undefined at 0
        "abs" => u.clone() * SymExpr::pow(SymExpr::call("abs", u.clone()), SymExpr::number(-1.0)),
        _ => return Err(SymbolicDerivativeError::Unsupported(func.to_string())),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer);
    mult_group.mult(derivative(u, with)?);
    Ok(mult_group.into())
}

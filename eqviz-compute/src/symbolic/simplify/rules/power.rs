//! Simplification rules for power expressions.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_power, finite}, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, matching [`f64::powf`].
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        (rhs.as_number()? == 0.0).then(|| SymExpr::number(1.0))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`, for a positive number `a`. A negative exponent would divide by zero, so it is left
/// alone.
pub fn power_zero_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        (lhs.as_number()? == 0.0 && rhs.as_number()? > 0.0).then(|| SymExpr::number(0.0))
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        (lhs.as_number()? == 1.0).then(|| SymExpr::number(1.0))
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        (rhs.as_number()? == 1.0).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, for an integer `c`. Other exponents can change the sign of the result,
/// such as `(x^2)^0.5 = abs(x)`.
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let outer = rhs.as_number()?;
        if outer.fract() != 0.0 {
            return None;
        }

        if let SymExpr::Exp(base, exponent) = lhs {
            return Some(SymExpr::pow(
                *base.clone(),
                *exponent.clone() * SymExpr::number(outer),
            ));
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Evaluates powers of numbers, if the result is a finite real number.
///
/// `2^3 = 8`
pub fn power_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let (base, exp) = (lhs.as_number()?, rhs.as_number()?);

        // keep exact fractions such as `2^-1` in their symbolic form
        if exp < 0.0 {
            return None;
        }
        finite(base.powf(exp))
    })?;

    step_collector.push(Step::PowerNumbers);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| power_numbers(expr, step_collector))
}

//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, finite}, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(|factor| factor.as_number() == Some(0.0)) {
            Some(SymExpr::number(0.0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| factor.as_number() != Some(1.0))
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies all numeric factors together. The product is placed before the other factors.
///
/// `2*x*3 = 6*x`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(SymExpr::is_number);
        if numbers.len() < 2 {
            return None;
        }

        let product = numbers.iter().filter_map(SymExpr::as_number).product::<f64>();
        let mut new_factors = vec![finite(product)?];
        new_factors.extend(rest);
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Moves the factors of nested products into the outer product.
///
/// `a*(b*c) = a*b*c`
pub fn flatten_multiply(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                other => new_factors.push(other.clone()),
            }
        }
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FlattenMultiply);
    Some(opt)
}

/// Extracts the base and exponent of an expression. If the expression is not [`SymExpr::Exp`],
/// the exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
        expr => (expr.clone(), SymExpr::number(1.0)),
    }
}

/// Combines like factors. Numeric bases are left alone.
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            let (current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);
            if current_factor.is_number() {
                current_factor_idx += 1;
                continue;
            }
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);

                // bases must be strictly equal
                // if they are, apply a^b*a^c = a^(b+c)
                if current_factor == next_factor {
                    current_factor_exp += next_factor_exp;
                    new_factors.remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                new_factors[current_factor_idx] = if current_factor_exp.as_number() == Some(1.0) {
                    current_factor
                } else {
                    SymExpr::pow(current_factor, current_factor_exp)
                };
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| flatten_multiply(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

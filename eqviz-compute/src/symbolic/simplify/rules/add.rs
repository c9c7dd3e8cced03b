//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::{do_add, finite}, step::Step},
    step_collector::StepCollector,
};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| term.as_number() != Some(0.0))
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Adds all numeric terms together. The sum is placed after the other terms.
///
/// `2+x+3 = x+5`
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let (numbers, mut new_terms): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(SymExpr::is_number);
        if numbers.len() < 2 {
            return None;
        }

        let sum = numbers.iter().filter_map(SymExpr::as_number).sum::<f64>();
        new_terms.push(finite(sum)?);
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Moves the terms of nested sums into the outer sum.
///
/// `a+(b+c) = a+b+c`
pub fn flatten_add(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                other => new_terms.push(other.clone()),
            }
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::FlattenAdd);
    Some(opt)
}

/// Extracts the numeric coefficient and the remaining factors of a term. If the term is not
/// [`SymExpr::Mul`], the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `2*a*b*4` -> `(8, a*b)`
/// - `a` -> `(1, a)`
fn get_coeff(expr: &SymExpr) -> (f64, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Number(num)) => (*num, SymExpr::number(1.0)),
        SymExpr::Mul(factors) => {
            let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(SymExpr::is_number);
            let coeff = numbers.iter().filter_map(SymExpr::as_number).product();
            (coeff, SymExpr::Mul(rest).downgrade())
        },
        _ => (1.0, expr.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = get_coeff(&new_terms[current_term_idx]);
            let mut combined = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = get_coeff(&new_terms[next_term_idx]);

                // factors must be strictly equal
                if current_term_factors == next_term_factors {
                    // if so, apply a*n + a*m = (n+m)*a
                    current_term_coeff += next_term_coeff;
                    new_terms.remove(next_term_idx);
                    combined = true;
                } else {
                    next_term_idx += 1;
                }
            }

            if combined {
                new_terms[current_term_idx] = if current_term_coeff == 1.0 {
                    current_term_factors
                } else {
                    finite(current_term_coeff)? * current_term_factors
                };
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| flatten_add(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

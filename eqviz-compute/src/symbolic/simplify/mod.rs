//! Light rule-based simplification of expressions.
//!
//! The [`simplify`] function repeatedly applies the rewriting rules in [`rules`] to an expression
//! and its children, in multiple passes, until no more rules apply. It folds numeric constants,
//! removes additive zeros and multiplicative ones, combines like terms and factors, and collapses
//! trivial powers. It does **not** compute a canonical form: two equivalent expressions can
//! simplify to different results.

pub mod rules;
pub mod step;

use step::Step;
use super::{expr::{Primary, SymExpr}, step_collector::StepCollector};

/// The maximum number of passes over one expression. Every rule reduces the size of the
/// expression, so this is only reached by very large expressions.
const MAX_PASSES: usize = 64;

/// Base implementation of the simplification algorithm. Returns the simplified expression, and
/// whether any rule was applied.
fn inner_simplify_with(
    expr: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> (SymExpr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
        }

        // then begin recursing into the expression's children
        match expr {
            SymExpr::Primary(Primary::Call(_, ref mut args)) => {
                for arg in args.iter_mut() {
                    let result = inner_simplify_with(arg, step_collector);
                    *arg = result.0;
                    changed_in_this_pass |= result.1;
                }
            },
            SymExpr::Primary(_) => {},
            SymExpr::Add(ref mut children) | SymExpr::Mul(ref mut children) => {
                for child in children.iter_mut() {
                    let result = inner_simplify_with(child, step_collector);
                    *child = result.0;
                    // use |= instead of = to not reset this to false if already true
                    changed_in_this_pass |= result.1;
                }
            },
            SymExpr::Exp(ref mut lhs, ref mut rhs) => {
                let result_l = inner_simplify_with(lhs, step_collector);
                let result_r = inner_simplify_with(rhs, step_collector);

                **lhs = result_l.0;
                **rhs = result_r.0;
                changed_in_this_pass |= result_l.1 || result_r.1;
            },
        }

        changed_at_least_once |= changed_in_this_pass;
        if !changed_in_this_pass {
            break;
        }
    }

    (expr, changed_at_least_once)
}

/// Simplify the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    inner_simplify_with(expr, &mut ()).0
}

/// Simplify the given expression. The rules applied are also returned, in the order they were
/// applied.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify_with(expr, &mut steps).0;
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use eqviz_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return its simplified form.
    fn simplified(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        simplify(&SymExpr::try_from(expr).unwrap())
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let simplified_expr = simplified("0+0*(3x+5b^2)+0+(3a)");
        assert_eq!(simplified_expr, SymExpr::Mul(vec![
            SymExpr::number(3.0),
            SymExpr::symbol("a"),
        ]));
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*(3x+5b^2)*1*(3a)"), SymExpr::number(0.0));
    }

    #[test]
    fn multiply_rules_2() {
        // also tests add_zero
        assert_eq!(simplified("1*3*1*1*1*(1+(x^2+5x+6)*0)*1*1"), SymExpr::number(3.0));
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + 2x + y - 3x"), SymExpr::symbol("y"));
        assert_eq!(simplified("x + x").to_string(), "2 * x");
    }

    #[test]
    fn combine_like_factors() {
        let simplified_expr = simplified("a * b * a^3 * b^4 * a^2");
        assert_eq!(simplified_expr, SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::symbol("a"), SymExpr::number(6.0)),
            SymExpr::pow(SymExpr::symbol("b"), SymExpr::number(5.0)),
        ]));
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplified("x^1"), SymExpr::symbol("x"));
        assert_eq!(simplified("(x + y)^0"), SymExpr::number(1.0));
        assert_eq!(simplified("1^x"), SymExpr::number(1.0));
        assert_eq!(simplified("(x^2)^3"), SymExpr::pow(SymExpr::symbol("x"), SymExpr::number(6.0)));
        assert_eq!(simplified("2^3 + x"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::number(8.0),
        ]));
    }

    #[test]
    fn keeps_undefined_powers() {
        // folding these would hide a division by zero or a non-real result
        assert_eq!(simplified("0^-1").to_string(), "1 / 0");
        assert_eq!(simplified("(-8)^0.5").to_string(), "(-8)^0.5");
        assert_eq!(simplified("(x^2)^0.5").to_string(), "(x^2)^0.5");
    }

    #[test]
    fn simplifies_call_arguments() {
        assert_eq!(simplified("sin(0 + x * 1)"), SymExpr::call("sin", SymExpr::symbol("x")));
    }

    #[test]
    fn collects_steps() {
        let expr = SymExpr::try_from(Parser::new("x + 0").try_parse_full::<AstExpr>().unwrap()).unwrap();
        let (simplified_expr, steps) = simplify_with_steps(&expr);
        assert_eq!(simplified_expr, SymExpr::symbol("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}

//! Checks that flag expressions likely to misbehave during analysis.

use crate::{
    bindings,
    diagnostic::{report, Diagnostic, DiagnosticSink, Severity, Stage},
};
use eqviz_compute::{consts::is_constant, evaluate, symbolic::SymExpr, ParsedExpression};
use std::collections::BTreeSet;

/// Symbols expected in an expression.
const EXPECTED_SYMBOLS: [&str; 4] = ["x", "y", "z", "t"];

/// Points at which the expression is evaluated to catch singularities near the origin.
const PROBE_POINTS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 1.0), (-1.0, -1.0), (0.5, 0.5)];

/// Validates the expression, returning the diagnostics found. See [`validate_with`].
pub fn validate(expr: &ParsedExpression) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_with(expr, &mut diagnostics);
    diagnostics
}

/// Validates the expression, reporting to the given sink:
///
/// - an error if the expression is invalid (nothing else is checked in that case),
/// - a warning for each symbol that is neither a constant nor one of `x`, `y`, `z`, `t`,
/// - a warning for each distinct divisor that depends on a variable,
/// - a warning for each probe point where the expression is not a finite number.
pub fn validate_with(expr: &ParsedExpression, sink: &mut dyn DiagnosticSink) {
    if !expr.is_valid {
        let message = expr.error_message.as_deref().unwrap_or("could not parse the expression");
        report(sink, Severity::Error, Stage::Validate, format!("invalid expression: {}", message));
        return;
    }

    let unexpected = expr.tree.post_order_iter()
        .filter_map(SymExpr::as_symbol)
        .filter(|name| !is_constant(name) && !EXPECTED_SYMBOLS.contains(name))
        .collect::<BTreeSet<_>>();
    for name in unexpected {
        report(sink, Severity::Warning, Stage::Validate, format!("unexpected variable `{}`", name));
    }

    let mut divisors = Vec::new();
    for sub in expr.tree.post_order_iter() {
        let SymExpr::Exp(base, exp) = sub else {
            continue;
        };
        let divides = exp.as_number().is_some_and(|n| n < 0.0)
            && expr.variables.iter().any(|var| base.contains_symbol(var));
        let divisor = base.to_string();
        if divides && !divisors.contains(&divisor) {
            report(sink, Severity::Warning, Stage::Validate, format!("division by `{}`, which may be zero", divisor));
            divisors.push(divisor);
        }
    }

    for (x, y) in PROBE_POINTS {
        if !evaluate(expr, &bindings(x, y)).is_finite() {
            report(sink, Severity::Warning, Stage::Validate, format!("expression may be undefined at ({}, {})", x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn messages(expr: &str) -> Vec<String> {
        validate(&parse(expr)).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn clean() {
        assert!(validate(&parse("x^2 + y^2")).is_empty());
        assert!(validate(&parse("sin(x) * e^y + pi")).is_empty());
    }

    #[test]
    fn invalid() {
        let diagnostics = validate(&parse("x + ("));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].context, Stage::Validate);
        assert!(diagnostics[0].message.starts_with("invalid expression: "));
    }

    #[test]
    fn unexpected_symbols() {
        assert_eq!(messages("a * x + b + a + z"), vec![
            "unexpected variable `a`".to_string(),
            "unexpected variable `b`".to_string(),
            "expression may be undefined at (0, 0)".to_string(),
            "expression may be undefined at (1, 1)".to_string(),
            "expression may be undefined at (-1, -1)".to_string(),
            "expression may be undefined at (0.5, 0.5)".to_string(),
        ]);
    }

    #[test]
    fn division() {
        assert_eq!(messages("1 / x + 2 / x"), vec![
            "division by `x`, which may be zero".to_string(),
            "expression may be undefined at (0, 0)".to_string(),
        ]);
        assert!(messages("x / 2").is_empty());
    }

    #[test]
    fn probe_points() {
        assert_eq!(messages("log(x)"), vec![
            "expression may be undefined at (0, 0)".to_string(),
            "expression may be undefined at (-1, -1)".to_string(),
        ]);
    }
}

//! Parsing free text into a [`ParsedExpression`].

use crate::symbolic::SymExpr;
use eqviz_error::Error;
use eqviz_parser::{
    normalize,
    parser::{expr::Expr as AstExpr, Parser},
};
use std::{collections::BTreeSet, io};
use tracing::debug;

/// An expression parsed from free text, together with its free variables.
///
/// Parsing never fails: if the text is not a valid expression, `is_valid` is false, `tree` is the
/// constant zero, and the reason is kept in `error_message` and `errors`.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedExpression {
    /// The symbolic form of the expression.
    pub tree: SymExpr,

    /// The free variables of the expression, sorted. Only single-letter names count as variables;
    /// `e` is always the constant.
    pub variables: BTreeSet<String>,

    /// Whether the text was parsed successfully.
    pub is_valid: bool,

    /// The message of the first error, if the text could not be parsed.
    pub error_message: Option<String>,

    /// The normalized text that was parsed. The spans of the errors point into this text.
    pub normalized: String,

    /// The errors found while parsing.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub errors: Vec<Error>,
}

/// Returns true if the symbol is a free variable.
fn is_variable(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_alphabetic() && c != 'e',
        _ => false,
    }
}

impl ParsedExpression {
    /// Normalizes and parses the given text.
    pub fn parse(text: &str) -> Self {
        Self::from_normalized(&normalize(text))
    }

    /// Parses text that has already been normalized.
    pub fn from_normalized(text: &str) -> Self {
        let result = Parser::new(text)
            .try_parse_full::<AstExpr>()
            .and_then(SymExpr::try_from);

        let parsed = match result {
            Ok(tree) => {
                let variables = tree.post_order_iter()
                    .filter_map(SymExpr::as_symbol)
                    .filter(|name| is_variable(name))
                    .map(str::to_string)
                    .collect();
                Self {
                    tree,
                    variables,
                    is_valid: true,
                    error_message: None,
                    normalized: text.to_string(),
                    errors: Vec::new(),
                }
            },
            Err(err) => Self {
                tree: SymExpr::number(0.0),
                variables: BTreeSet::new(),
                is_valid: false,
                error_message: Some(err.message()),
                normalized: text.to_string(),
                errors: vec![err],
            },
        };

        debug!(
            normalized = %parsed.normalized,
            valid = parsed.is_valid,
            variables = ?parsed.variables,
            "parsed expression",
        );
        parsed
    }

    /// Returns true if the given variable is free in the expression.
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    /// Writes a report of every parse error to the given writer.
    pub fn write_errors(&self, src_id: &str, mut writer: impl io::Write) -> io::Result<()> {
        for err in &self.errors {
            err.write_report(src_id, &self.normalized, &mut writer)?;
        }
        Ok(())
    }

    /// Prints a report of every parse error to stderr.
    pub fn report_errors_to_stderr(&self, src_id: &str) -> io::Result<()> {
        for err in &self.errors {
            err.report_to_stderr(src_id, &self.normalized)?;
        }
        Ok(())
    }
}

/// Normalizes and parses the given text. See [`ParsedExpression::parse`].
pub fn parse(text: &str) -> ParsedExpression {
    ParsedExpression::parse(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn vars(expr: &ParsedExpression) -> Vec<&str> {
        expr.variables.iter().map(String::as_str).collect()
    }

    #[test]
    fn variables_sorted_and_unique() {
        let expr = parse("sin(x)*cos(y)");
        assert!(expr.is_valid);
        assert_eq!(vars(&expr), vec!["x", "y"]);

        assert_eq!(vars(&parse("y*x + x^2")), vec!["x", "y"]);
    }

    #[test]
    fn constants_are_not_variables() {
        let expr = parse("e^x + pi");
        assert_eq!(vars(&expr), vec!["x"]);
        assert!(parse("2 + 3").variables.is_empty());
    }

    #[test]
    fn dependent_variable_dropped() {
        let expr = parse("z = x^2 + y^2");
        assert_eq!(expr.normalized, "x^2 + y^2");
        assert_eq!(vars(&expr), vec!["x", "y"]);
    }

    #[test]
    fn implicit_equation_keeps_both_sides() {
        let expr = parse("x^2 + y^2 = 1");
        assert!(expr.is_valid);
        assert_eq!(vars(&expr), vec!["x", "y"]);
    }

    #[test]
    fn invalid_text() {
        for text in ["", "x + (", "x = y = z", "2 $ 3", "log(x, 2)"] {
            let expr = parse(text);
            assert!(!expr.is_valid, "`{}` should be invalid", text);
            assert_eq!(expr.tree, SymExpr::number(0.0));
            assert!(expr.variables.is_empty());
            assert!(expr.error_message.is_some());
            assert_eq!(expr.errors.len(), 1);
        }
    }

    #[test]
    fn error_message_of_first_error() {
        // normalization would turn `sine(x)` into `sine*(x)`
        let expr = ParsedExpression::from_normalized("sine(x)");
        assert_eq!(expr.error_message.as_deref(), Some("the `sine` function does not exist"));

        let mut buf = Vec::new();
        expr.write_errors("input", &mut buf).unwrap();
        let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(report.contains("did you mean the `sin` function?"));
    }

    #[test]
    fn from_normalized_skips_normalization() {
        // `2x` is only understood as multiplication by the parser, not rewritten
        let expr = ParsedExpression::from_normalized("2x");
        assert!(expr.is_valid);
        assert_eq!(expr.normalized, "2x");
    }
}

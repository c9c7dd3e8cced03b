use ariadne::Fmt;
use eqviz_attrs::ErrorKind;
use eqviz_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// Lists token kinds for a label, such as "`+`, `-`, or a number".
fn describe_tokens(kinds: &[TokenKind]) -> String {
    let names = kinds.iter().map(|kind| kind.to_string()).collect::<Vec<_>>();
    match names.as_slice() {
        [] => "nothing".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// Signals that a speculative parse should be abandoned. It is caught by the parser and never
/// reaches the user.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the parser gave up on this operator",
    labels = ["here"],
    help = "this error is internal to the parser and should never be reported",
)]
pub struct NonFatal;

/// The expression ended while an operand was still needed, as in `x +`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression ended too early",
    labels = [format!("add an {} after this", "operand".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was parsed, but text remains after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected text after the expression",
    labels = [format!("this is not part of the {}", "expression".fg(EXPR))],
    help = "an equation may contain at most one `=`",
)]
pub struct ExpectedEof;

/// A token appeared where it cannot be used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", found),
    labels = [format!("expected {}", describe_tokens(expected))],
)]
pub struct UnexpectedToken {
    /// The kinds of token that would have been accepted.
    pub expected: &'static [TokenKind],

    /// The kind of token that was found.
    pub found: TokenKind,
}

/// Something other than an operand was found where an operand was needed.
///
/// `expected` reads as a noun phrase with its article, such as "an expression".
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}", expected),
    labels = [format!("{} is needed here", expected)],
)]
pub struct ExpectedExpr {
    pub expected: &'static str,
}

/// A number literal does not fit in a float.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed number",
    labels = ["this is not a valid number"],
)]
pub struct InvalidNumber;

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = [if *opening { "this `(` is never closed" } else { "this `)` was never opened" }],
    help = if *opening {
        "add a `)` after the grouped expression"
    } else {
        "add a `(` before the grouped expression, or remove this `)`"
    },
)]
pub struct UnclosedParenthesis {
    /// True for an unmatched `(`, false for an unmatched `)`.
    pub opening: bool,
}

/// A pair of parentheses with nothing inside, such as `()`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = ["put an expression between these parentheses"],
)]
pub struct EmptyParenthesis;

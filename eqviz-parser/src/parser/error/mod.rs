//! Errors produced while parsing. The [`Error`] type itself is shared with the rest of the
//! workspace through the `eqviz-error` crate; this module defines the parser's error kinds.

pub mod kind;

pub use eqviz_error::Error;

/// Marks the error as fatal, so that no other alternative is attempted by the parser.
///
/// Used once the parser has committed to a construct, such as after consuming an opening
/// parenthesis or a unary operator.
pub(crate) fn into_fatal(mut err: Error) -> Error {
    err.fatal = true;
    err
}

//! Errors found while lowering a parsed expression into its symbolic form.

use ariadne::Fmt;
use eqviz_attrs::ErrorKind;
use eqviz_error::{ErrorKind, EXPR};

/// The called function does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "the available functions are sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, log, sqrt, exp and abs".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UndefinedFunction {
    /// The name of the function that was called.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function was called with more than one argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument, but {} were given", name, expected, given),
    labels = ["this call", "remove the extra arguments"],
    help = format!("write `{}(...)` with a single expression inside", name.fg(EXPR)),
)]
pub struct TooManyArguments {
    pub name: String,
    pub expected: usize,
    pub given: usize,
}

/// A function was called with an empty argument list.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is missing argument #{}", name, index + 1),
    labels = ["this call", "add an expression between the parentheses"],
    help = format!(
        "`{}` takes {} argument, but {} were given",
        name.fg(EXPR),
        expected,
        given,
    ),
)]
pub struct MissingArgument {
    pub name: String,

    /// The zero-based position of the first missing argument.
    pub index: usize,

    pub expected: usize,
    pub given: usize,
}

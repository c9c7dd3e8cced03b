//! Algebraic manipulation of expressions.
//!
//! Expressions in this module are represented as a tree of [`SymExpr`] nodes, which flatten the
//! AST produced by [`eqviz_parser`] into lists of terms and factors. See the [`expr`] module for
//! details.
//!
//! The [`derivative`] module computes symbolic partial derivatives, and the [`simplify`] module
//! cleans up the result with a small set of rewriting rules.
//!
//! ```
//! use eqviz_compute::parse;
//! use eqviz_compute::symbolic::{derivative::derivative, simplify};
//!
//! let expr = parse("x^3 + 2x");
//! let dx = simplify(&derivative(&expr.tree, "x").unwrap());
//! assert_eq!(dx.to_string(), "3 * x^2 + 2");
//! ```

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use expr::{Primary, SymExpr};
pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;

//! Computation on parsed math expressions.
//!
//! A [`ParsedExpression`] is produced from free text by [`parse`]. It holds the flattened
//! symbolic tree ([`symbolic::SymExpr`]) together with the expression's free variables. The tree
//! can be differentiated ([`symbolic::derivative`]), lightly simplified ([`symbolic::simplify`]),
//! and evaluated numerically ([`evaluate`]).
//!
//! ```
//! use eqviz_compute::{evaluate, parse};
//! use std::collections::HashMap;
//!
//! let expr = parse("z = x^2 + y^2");
//! assert!(expr.is_valid);
//!
//! let bindings = HashMap::from([("x".to_string(), 3.0), ("y".to_string(), 4.0)]);
//! assert_eq!(evaluate(&expr, &bindings), 25.0);
//! ```

pub mod consts;
pub mod error;
pub mod numerical;
pub mod parsed;
pub mod symbolic;

pub use numerical::evaluate;
pub use parsed::{parse, ParsedExpression};

//! Turns the free text typed by a user into an abstract syntax tree.
//!
//! Input goes through two stages: [`normalize`] rewrites notational conveniences (`2x`, `x²`,
//! `z = ...`) into plain ASCII syntax, then the [`parser::Parser`] builds an [`parser::expr::Expr`]
//! from the normalized text.

pub mod normalize;
pub mod parser;
pub mod tokenizer;

pub use normalize::normalize;

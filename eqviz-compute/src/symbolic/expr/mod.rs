//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](eqviz_parser::parser::expr::Expr) type from `eqviz_parser` is a recursive `enum`
//! that mirrors the syntax of the source text. It's convenient for parsing, but not so much for
//! differentiation or simplification.
//!
//! This module defines [`SymExpr`], which **flattens** the AST into lists of terms and factors.
//! Subtraction is stored as addition of a negated term, division as multiplication by a power
//! with exponent `-1`, and negation as multiplication by `-1`.
//!
//! # Strict equality
//!
//! The [`PartialEq`] implementation for [`SymExpr`] implements **strict equality**, not semantic
//! equality. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//!   etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//!   terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! `x^2 + 2x + 1` and `(x + 1)^2` are semantically equal, but not strictly equal. Strict equality
//! never reports false positives, which is what the simplifier needs to combine like terms.

mod iter;

use crate::{
    error::{MissingArgument, TooManyArguments, UndefinedFunction},
    numerical::funcs::{self, Builtin},
};
use eqviz_error::Error;
use eqviz_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use iter::ExprIter;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primary {
    /// A number, such as `2` or `0.5`.
    Number(f64),

    /// A variable or named constant, such as `x` or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)`.
    Call(String, Vec<SymExpr>),
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are numbers, the numbers are added together.
/// Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs + rhs)),
            (lhs, rhs) => SymExpr::Add(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are numbers, the numbers are multiplied
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs * rhs)),
            (lhs, rhs) => SymExpr::Mul(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// Returns true if the term is written with a leading minus sign.
fn is_negative_term(term: &SymExpr) -> bool {
    match term {
        SymExpr::Primary(Primary::Number(num)) => *num < 0.0,
        SymExpr::Mul(factors) => factors.iter().any(|factor| factor.as_number().is_some_and(|n| n < 0.0)),
        _ => false,
    }
}

/// Returns the term with its leading minus sign removed. The term must satisfy
/// [`is_negative_term`].
fn negate_term(term: &SymExpr) -> SymExpr {
    match term {
        SymExpr::Primary(Primary::Number(num)) => SymExpr::Primary(Primary::Number(-num)),
        SymExpr::Mul(factors) => {
            let mut factors = factors.clone();
            if let Some(idx) = factors.iter().position(|factor| factor.as_number().is_some_and(|n| n < 0.0)) {
                match factors[idx].as_number() {
                    Some(n) if n == -1.0 => {
                        factors.remove(idx);
                    },
                    Some(n) => factors[idx] = SymExpr::Primary(Primary::Number(-n)),
                    None => {},
                }
            }
            SymExpr::Mul(factors).downgrade()
        },
        other => other.clone(),
    }
}

/// If the factor is a power with a negative numeric exponent, returns the factor with the
/// exponent negated, so that it can be written in a denominator.
fn as_denominator(factor: &SymExpr) -> Option<SymExpr> {
    if let SymExpr::Exp(base, exp) = factor {
        let exp = exp.as_number()?;
        if exp < 0.0 {
            return Some(if exp == -1.0 {
                *base.clone()
            } else {
                SymExpr::Exp(base.clone(), Box::new(SymExpr::Primary(Primary::Number(-exp))))
            });
        }
    }

    None
}

/// Writes a factor of a product, adding parentheses if it would otherwise bind incorrectly.
fn fmt_factor(f: &mut std::fmt::Formatter<'_>, factor: &SymExpr, first: bool) -> std::fmt::Result {
    let parenthesize = match factor {
        SymExpr::Add(_) | SymExpr::Mul(_) => true,
        SymExpr::Primary(Primary::Number(num)) => !first && *num < 0.0,
        _ => false,
    };

    if parenthesize {
        write!(f, "({})", factor)
    } else {
        write!(f, "{}", factor)
    }
}

/// Writes a list of factors as a product, with numbers first and factors with negative exponents
/// moved into a denominator.
fn fmt_product(f: &mut std::fmt::Formatter<'_>, factors: &[&SymExpr]) -> std::fmt::Result {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match as_denominator(factor) {
            Some(den) => denominator.push(den),
            None => numerator.push(*factor),
        }
    }
    numerator.sort_by_key(|factor| !factor.is_number());

    match numerator.as_slice() {
        [] => write!(f, "1")?,
        [first] => fmt_factor(f, first, true)?,
        [first, rest @ ..] => {
            if first.as_number() == Some(-1.0) {
                write!(f, "-")?;
                fmt_factor(f, rest[0], false)?;
                for factor in &rest[1..] {
                    write!(f, " * ")?;
                    fmt_factor(f, factor, false)?;
                }
            } else {
                fmt_factor(f, first, true)?;
                for factor in rest {
                    write!(f, " * ")?;
                    fmt_factor(f, factor, false)?;
                }
            }
        },
    }

    match denominator.as_slice() {
        [] => Ok(()),
        [single] => {
            write!(f, " / ")?;
            fmt_factor(f, single, false)
        },
        [first, rest @ ..] => {
            write!(f, " / (")?;
            fmt_factor(f, first, false)?;
            for factor in rest {
                write!(f, " * ")?;
                fmt_factor(f, factor, false)?;
            }
            write!(f, ")")
        },
    }
}

/// The display form is always valid input for [`crate::parse`], so derivatives can be stored as
/// text and parsed again later.
impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        if is_negative_term(term) {
                            let negated = negate_term(term);
                            if matches!(negated, Self::Add(_)) {
                                write!(f, " - ({})", negated)?;
                            } else {
                                write!(f, " - {}", negated)?;
                            }
                        } else {
                            write!(f, " + {}", term)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_product(f, &factors.iter().collect::<Vec<_>>()),
            Self::Exp(base, exp) => {
                if as_denominator(self).is_some() {
                    return fmt_product(f, &[self]);
                }

                let base_parens = match &**base {
                    Self::Primary(Primary::Number(num)) => *num < 0.0,
                    Self::Primary(_) => false,
                    _ => true,
                };
                if base_parens {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }

                write!(f, "^")?;
                if matches!(&**exp, Self::Primary(_)) {
                    write!(f, "{}", exp)
                } else {
                    write!(f, "({})", exp)
                }
            },
        }
    }
}

impl SymExpr {
    /// Creates an expression holding the given number.
    pub fn number(num: f64) -> Self {
        Self::Primary(Primary::Number(num))
    }

    /// Creates an expression holding the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates an expression calling the given function with one argument.
    pub fn call(name: impl Into<String>, arg: SymExpr) -> Self {
        Self::Primary(Primary::Call(name.into(), vec![arg]))
    }

    /// Creates the power `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// If the expression is a [`Primary::Number`], returns the contained number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(*num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if the expression does not depend on the given symbol.
    pub fn is_free_of(&self, name: &str) -> bool {
        !self.contains_symbol(name)
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::number(0.0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::number(1.0)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Checks that the builtin function exists and is called with the right number of arguments.
fn check_call(call: &eqviz_parser::parser::call::Call) -> Result<&'static Builtin, Error> {
    let name = &call.name.name;
    let builtin = funcs::get(name).ok_or_else(|| Error::new(
        vec![call.name.span.clone()],
        UndefinedFunction {
            name: name.clone(),
            suggestions: funcs::similar(name),
        },
    ))?;

    let given = call.args.len();
    if given > Builtin::ARITY {
        return Err(Error::new(
            call.outer_span().to_vec(),
            TooManyArguments { name: name.clone(), expected: Builtin::ARITY, given },
        ));
    } else if given < Builtin::ARITY {
        return Err(Error::new(
            call.outer_span().to_vec(),
            MissingArgument { name: name.clone(), index: given, expected: Builtin::ARITY, given },
        ));
    }

    Ok(builtin)
}

/// Lowers the AST into a flattened symbolic expression. Terms and factors keep their
/// left-to-right order.
///
/// Function calls are checked during conversion: calling an unknown function, or calling a
/// function with the wrong number of arguments, is an error.
impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr {
            AstExpr::Literal(Literal::Number(num)) => Self::number(num.value),
            AstExpr::Literal(Literal::Symbol(sym)) => Self::Primary(Primary::Symbol(sym.name)),
            AstExpr::Paren(paren) => Self::try_from(*paren.expr)?,
            AstExpr::Call(call) => {
                let builtin = check_call(&call)?;
                let args = call.args
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Self::Primary(Primary::Call(builtin.name.to_string(), args))
            },
            AstExpr::Unary(unary) => {
                let operand = Self::try_from(*unary.operand)?;
                match unary.op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Pos => operand,
                }
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => lhs * Self::pow(rhs, Self::number(-1.0)),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + -rhs,
                }
            },
        })
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening). The order of the terms is kept.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening). The order of the factors is kept.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::number(-num),
            expr => Self::number(-1.0) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use eqviz_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    /// Parse the given expression and return the error produced while lowering it.
    fn lowering_error(input: &str) -> Error {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap_err()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // semantically equal, but not strictly equal
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::number(2.0)),
            SymExpr::Mul(vec![SymExpr::number(5.0), SymExpr::symbol("x")]),
            SymExpr::number(6.0),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - y / 2");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![
                SymExpr::number(-1.0),
                SymExpr::symbol("y"),
                SymExpr::pow(SymExpr::number(2.0), SymExpr::number(-1.0)),
            ]),
        ]));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let expr = parse_expr("-x^2");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::number(-1.0),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::number(2.0)),
        ]));
    }

    #[test]
    fn calls_are_checked() {
        let expr = parse_expr("sin(x) * cos(y)");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::call("sin", SymExpr::symbol("x")),
            SymExpr::call("cos", SymExpr::symbol("y")),
        ]));
    }

    #[test]
    fn unknown_function() {
        let err = lowering_error("1 + sine(x)");
        assert_eq!(err.message(), "the `sine` function does not exist");
        assert_eq!(err.spans, vec![4..8]);
    }

    #[test]
    fn wrong_arity() {
        let err = lowering_error("log(x, 2)");
        assert_eq!(err.message(), "`log` takes 1 argument, but 2 were given");

        let err = lowering_error("sqrt()");
        assert_eq!(err.message(), "`sqrt` is missing argument #1");
    }

    #[test]
    fn post_order() {
        let expr = parse_expr("x + sin(y)");
        let order = expr.post_order_iter().map(|expr| expr.to_string()).collect::<Vec<_>>();
        assert_eq!(order, vec!["x", "y", "sin(y)", "x + sin(y)"]);
    }

    #[test]
    fn free_of() {
        let expr = parse_expr("x^2 + log(y)");
        assert!(expr.contains_symbol("y"));
        assert!(expr.is_free_of("z"));
    }

    #[test]
    fn fmt_expr() {
        assert_eq!(parse_expr("x^2 + 5x + 6").to_string(), "x^2 + 5 * x + 6");
        assert_eq!(parse_expr("x - 3y").to_string(), "x - 3 * y");
        assert_eq!(parse_expr("-x^2 - y").to_string(), "-x^2 - y");
        assert_eq!(parse_expr("x / (2y)").to_string(), "x / (2 * y)");
        assert_eq!(parse_expr("1 / x^2").to_string(), "1 / x^2");
        assert_eq!(parse_expr("2(x + 1)").to_string(), "2 * (x + 1)");
        assert_eq!(parse_expr("(x + 1)^(y - 1)").to_string(), "(x + 1)^(y - 1)");
        assert_eq!(parse_expr("x - (y + 1)").to_string(), "x - (y + 1)");
    }

    #[test]
    fn fmt_reparses() {
        for input in ["x^2 - 2x y + 3", "sin(x) / (y * cos(x))", "-(x + y)^2", "(-2)^x"] {
            let expr = parse_expr(input);
            assert_eq!(parse_expr(&expr.to_string()), expr, "`{}` did not round trip", input);
        }
    }
}

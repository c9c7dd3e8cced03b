use std::{fmt, ops::Range};
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Primary},
        error::{into_fatal, kind, Error},
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if input.at_end() {
            return Err(input.error(kind::UnexpectedEof));
        }

        let _ = try_parse_catch_fatal!(input.try_parse::<Unary>().map(Expr::Unary));
        match input.try_parse::<Primary>() {
            Ok(primary) => Ok(primary.into()),
            Err(err) if err.fatal => Err(err),
            Err(_) => Err(input.error(kind::ExpectedExpr { expected: "an expression" })),
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;

        // the operand binds everything of higher precedence than the operator, so `-x^2` is
        // `-(x^2)`
        let operand = Unary::parse_or_lower(input)
            .and_then(|lhs| Binary::parse_expr(input, lhs, op.precedence()))
            .map_err(into_fatal)?;
        let span = op.span.start..operand.span().end;

        Ok(Self {
            operand: Box::new(operand),
            op,
            span,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op.kind, self.operand)
    }
}

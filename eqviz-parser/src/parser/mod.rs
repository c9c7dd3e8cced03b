pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use eqviz_error::ErrorKind;
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro also catches fatal errors and immediately short-circuits the parsing process.
///
/// If parsing is successful, the value is returned from the enclosing function. Otherwise, the
/// error of the last attempted parsing function is produced by the macro.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// A high-level parser for math expressions. This is the type to use to parse an arbitrary piece
/// of normalized text into an abstract syntax tree.
///
/// ```
/// use eqviz_parser::parser::{expr::Expr, Parser};
///
/// let mut parser = Parser::new("x^2 + 2*y");
/// let expr = parser.try_parse_full::<Expr>().unwrap();
/// assert_eq!(expr.span(), 0..9);
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Set the cursor of this parser to the cursor of another parser. Used after parsing ahead
    /// with a clone of this parser.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns true if there are no non-whitespace tokens left to parse.
    pub fn at_end(&self) -> bool {
        self.tokens[self.cursor..].iter().all(Token::is_whitespace)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    // a delimiter was consumed, so the next value is required
                    self.cursor = start;
                    return Err(err);
                },
            }

            let mut input_ahead = self.clone();
            match input_ahead.next_token() {
                Ok(token) if token.kind == delimiter => self.set_cursor(&input_ahead),
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.at_end() {
            return Ok(value);
        }

        let mut input_ahead = self.clone();
        match input_ahead.next_token() {
            Ok(token) if token.kind == TokenKind::CloseParen => {
                Err(Error::new(vec![token.span], kind::UnclosedParenthesis { opening: false }))
            },
            _ => Err(Error::new(vec![self.span().start..self.eof_span().end], kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// Consumers of the library should prefer [`Parser::try_parse`], which backtracks on failure.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication has the same precedence.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    /// Parses the full input, panicking on failure.
    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    /// Parses the full input, returning the error message.
    fn parse_err(input: &str) -> String {
        Parser::new(input).try_parse_full::<Expr>().unwrap_err().message()
    }

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit: false, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), num(16.0, 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), num(3.14, 0..4));
        assert_eq!(parse(".5"), num(0.5, 0..2));
    }

    #[test]
    fn literal_symbol() {
        assert_eq!(parse("pi"), sym("pi", 0..2));
    }

    #[test]
    fn binary_left_associativity() {
        assert_eq!(
            parse("x-y-1"),
            bin(
                bin(sym("x", 0..1), BinOpKind::Sub, 1..2, sym("y", 2..3)),
                BinOpKind::Sub,
                3..4,
                num(1.0, 4..5),
            ),
        );
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(
            parse("1 + 2 * x"),
            bin(
                num(1.0, 0..1),
                BinOpKind::Add,
                2..3,
                bin(num(2.0, 4..5), BinOpKind::Mul, 6..7, sym("x", 8..9)),
            ),
        );
    }

    #[test]
    fn exp_right_associativity() {
        assert_eq!(
            parse("2^3^2"),
            bin(
                num(2.0, 0..1),
                BinOpKind::Exp,
                1..2,
                bin(num(3.0, 2..3), BinOpKind::Exp, 3..4, num(2.0, 4..5)),
            ),
        );
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, 2..3, num(2.0, 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(
            parse("2^-x"),
            bin(
                num(2.0, 0..1),
                BinOpKind::Exp,
                1..2,
                Expr::Unary(Unary {
                    operand: Box::new(sym("x", 3..4)),
                    op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                    span: 2..4,
                }),
            ),
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2(x+1)"), Expr::Binary(Binary {
            lhs: Box::new(num(2.0, 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(bin(sym("x", 2..3), BinOpKind::Add, 3..4, num(1.0, 4..5))),
                span: 1..6,
            })),
            span: 0..6,
        }));
    }

    #[test]
    fn implicit_multiplication_before_power() {
        // `1 + 2 x^2` is `1 + (2 * (x^2))`
        let Expr::Binary(sum) = parse("1 + 2 x^2") else {
            panic!("expected a sum");
        };
        assert_eq!(sum.op.kind, BinOpKind::Add);

        let Expr::Binary(product) = *sum.rhs else {
            panic!("expected a product");
        };
        assert!(product.op.implicit);
        assert_eq!(*product.lhs, num(2.0, 4..5));
        assert_eq!(
            *product.rhs,
            bin(sym("x", 6..7), BinOpKind::Exp, 7..8, num(2.0, 8..9)),
        );
    }

    #[test]
    fn function_call() {
        assert_eq!(parse("sin(x)"), Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![sym("x", 4..5)],
            span: 0..6,
            paren_span: 3..6,
        }));
    }

    #[test]
    fn function_call_multiple_args() {
        let Expr::Call(call) = parse("f(x, y + 1)") else {
            panic!("expected a call");
        };
        assert_eq!(call.name.name, "f");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.args[0], sym("x", 2..3));
    }

    #[test]
    fn unary_plus() {
        assert_eq!(parse("+x"), Expr::Unary(Unary {
            operand: Box::new(sym("x", 1..2)),
            op: UnaryOp { kind: UnaryOpKind::Pos, span: 0..1 },
            span: 0..2,
        }));
    }

    #[test]
    fn display() {
        assert_eq!(parse("2(x+1) - -y^2").to_string(), "2 (x + 1) - -y ^ 2");
        assert_eq!(parse("log(x,  2)").to_string(), "log(x, 2)");
    }

    #[test]
    fn errors() {
        assert_eq!(parse_err("x +"), "the expression ended too early");
        assert_eq!(parse_err("(x + 1"), "unbalanced parentheses");
        assert_eq!(parse_err("x + 1)"), "unbalanced parentheses");
        assert_eq!(parse_err("()"), "empty parentheses");
        assert_eq!(parse_err("x = y"), "unexpected text after the expression");
        assert_eq!(parse_err("x + * y"), "expected an expression");
        assert_eq!(parse_err(""), "the expression ended too early");
    }
}

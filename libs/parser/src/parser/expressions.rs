//! # Operator Parsing
//!
//! The expression precedence ladder.
//!
//! ## Precedence (lowest to highest)
//!
//! | Level | Operators | Shape |
//! |-------|-----------|-------|
//! | conditional | `? :` | right-associative |
//! | 0 | `\|\|` | right-leaning chain |
//! | 1 | `&&` | right-leaning chain |
//! | 2 | `== !=` | right-leaning chain |
//! | 3 | `> >= < <=` | right-leaning chain |
//! | 4 | `+ -` | right-leaning chain |
//! | 5 | `* / %` | right-leaning chain |
//! | unary | `! -` | prefix |
//! | postfix | `[i] .a .0 .* [*]` | left fold over a primary |
//!
//! Each level parses the next tighter level for the left operand and recurses
//! into its own level for the right operand, so chains of equal precedence
//! nest to the right: `1 - 2 - 3` is `1 - (2 - 3)`. Post-parse walkers rely
//! on this shape.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::{BinaryOp, Expression, UnaryOp};

/// Binary operators by precedence level; longer symbols listed first so
/// `>=` wins over `>`.
const BINARY_LEVELS: [&[(&str, BinaryOp)]; 6] = [
    &[("||", BinaryOp::Or)],
    &[("&&", BinaryOp::And)],
    &[("==", BinaryOp::Eq), ("!=", BinaryOp::NotEq)],
    &[
        (">=", BinaryOp::GtEq),
        ("<=", BinaryOp::LtEq),
        (">", BinaryOp::Gt),
        ("<", BinaryOp::Lt),
    ],
    &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)],
    &[("*", BinaryOp::Mul), ("/", BinaryOp::Div), ("%", BinaryOp::Mod)],
];

impl<'a> Parser<'a> {
    /// Parse a conditional: `predicate ? trueExpr : falseExpr`.
    ///
    /// Right-associative; both branches recurse into the full expression.
    pub(crate) fn conditional(&mut self) -> Result<Expression, ParseError> {
        let predicate = self.binary_level(0)?;

        let checkpoint = self.cursor.checkpoint();
        self.skip_space();
        if !self.cursor.eat_char('?') {
            self.cursor.rewind(checkpoint);
            return Ok(predicate);
        }
        self.skip_space();
        let true_expr = self.expression()?;
        self.skip_space();
        if !self.cursor.eat_char(':') {
            return Err(self.fail("\":\""));
        }
        self.skip_space();
        let false_expr = self.expression()?;

        Ok(Expression::ConditionalOperator {
            predicate: Box::new(predicate),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
        })
    }

    /// Parse one precedence level of binary operators.
    fn binary_level(&mut self, level: usize) -> Result<Expression, ParseError> {
        if level >= BINARY_LEVELS.len() {
            return self.unary();
        }
        let left = self.binary_level(level + 1)?;

        let checkpoint = self.cursor.checkpoint();
        self.skip_space();
        let operator = match self.match_binary_op(level) {
            Some(operator) => operator,
            None => {
                self.cursor.rewind(checkpoint);
                return Ok(left);
            }
        };
        self.skip_space();
        let right = self.binary_level(level)?;

        Ok(Expression::BinaryOperator {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Consume a binary operator of the given level, if next.
    fn match_binary_op(&mut self, level: usize) -> Option<BinaryOp> {
        for (symbol, operator) in BINARY_LEVELS[level] {
            if !self.cursor.starts_with(symbol) {
                continue;
            }
            // A slash may open a comment rather than a division.
            if *symbol == "/" && (self.cursor.starts_with("//") || self.cursor.starts_with("/*")) {
                continue;
            }
            self.cursor.eat(symbol);
            return Some(*operator);
        }
        None
    }

    /// Parse a unary expression: `!term`, `-term`, or a postfix chain.
    pub(crate) fn unary(&mut self) -> Result<Expression, ParseError> {
        let operator = if self.cursor.eat_char('!') {
            UnaryOp::Not
        } else if self.cursor.eat_char('-') {
            UnaryOp::Neg
        } else {
            return self.postfix();
        };
        self.skip_space();
        let term = self.unary()?;
        Ok(Expression::UnaryOperator { operator, term: Box::new(term) })
    }
}

// =============================================================================
// TESTS
// =============================================================================

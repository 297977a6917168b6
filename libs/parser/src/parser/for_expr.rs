//! # For-Expression Parsing
//!
//! Collection comprehensions. The caller has consumed the opening bracket
//! and verified the `for` keyword.
//!
//! ## Grammar
//!
//! ```text
//! for_tuple  = "for" intro expression ("if" expression)? "]"
//! for_object = "for" intro expression "=>" expression "..."?
//!              ("if" expression)? "}"
//! intro      = identifier ("," identifier)? "in" expression ":"
//! ```

use super::Parser;
use crate::error::ParseError;
use hcl_ast::{Expression, ForExpression, ForIntro};

impl<'a> Parser<'a> {
    /// Parse a tuple for-expression up to and including the closing `]`.
    pub(crate) fn for_tuple(&mut self) -> Result<Expression, ParseError> {
        let intro = self.for_intro()?;
        let expression = self.expression()?;
        let condition = self.for_condition()?;
        self.skip_space();
        if !self.cursor.eat_char(']') {
            return Err(self.fail("\"]\""));
        }
        Ok(Expression::ForExpression(Box::new(ForExpression::Tuple {
            intro,
            expression,
            condition,
        })))
    }

    /// Parse an object for-expression up to and including the closing `}`.
    pub(crate) fn for_object(&mut self) -> Result<Expression, ParseError> {
        let intro = self.for_intro()?;
        let key = self.expression()?;
        self.skip_space();
        if !self.cursor.eat("=>") {
            return Err(self.fail("\"=>\""));
        }
        self.skip_space();
        let value = self.expression()?;
        self.skip_space();
        let grouping = self.cursor.eat("...");
        let condition = self.for_condition()?;
        self.skip_space();
        if !self.cursor.eat_char('}') {
            return Err(self.fail("\"}\""));
        }
        Ok(Expression::ForExpression(Box::new(ForExpression::Object {
            intro,
            key,
            value,
            grouping,
            condition,
        })))
    }

    /// Parse `for ident ("," ident)? "in" expression ":"`.
    fn for_intro(&mut self) -> Result<ForIntro, ParseError> {
        self.eat_keyword("for");
        self.skip_space();
        let iterator = self.scan_identifier()?;
        self.skip_space();

        let value = if self.cursor.eat_char(',') {
            self.skip_space();
            let value = self.scan_identifier()?;
            self.skip_space();
            Some(value)
        } else {
            None
        };

        if !self.eat_keyword("in") {
            return Err(self.fail("\"in\""));
        }
        self.skip_space();
        let collection = self.expression()?;
        self.skip_space();
        if !self.cursor.eat_char(':') {
            return Err(self.fail("\":\""));
        }
        self.skip_space();

        Ok(ForIntro { iterator, value, collection })
    }

    /// Parse the optional `if cond` filter.
    fn for_condition(&mut self) -> Result<Option<Expression>, ParseError> {
        let checkpoint = self.cursor.checkpoint();
        self.skip_space();
        if self.eat_keyword("if") {
            self.skip_space();
            Ok(Some(self.expression()?))
        } else {
            self.cursor.rewind(checkpoint);
            Ok(None)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

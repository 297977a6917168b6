//! # Collection Parsing
//!
//! Tuple and object literals, and the first-token disambiguation against
//! for-expressions: after `[` or `{` (and any whitespace), the literal
//! keyword `for` on an identifier boundary always starts a comprehension.
//!
//! Object elements accept `=` or `:` after the key and are separated by
//! commas and/or newlines; trailing commas are tolerated in both collection
//! forms.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::{Expression, ObjectValueElement};

impl<'a> Parser<'a> {
    /// Parse `[...]`: a tuple literal or a tuple for-expression.
    pub(crate) fn tuple_or_for(&mut self) -> Result<Expression, ParseError> {
        self.cursor.advance(); // [
        self.bracket_depth += 1;
        self.skip_space();

        let expression = if self.peek_keyword("for") {
            self.for_tuple()?
        } else {
            self.tuple()?
        };

        self.bracket_depth -= 1;
        Ok(expression)
    }

    /// Parse `{...}`: an object literal or an object for-expression.
    pub(crate) fn object_or_for(&mut self) -> Result<Expression, ParseError> {
        self.cursor.advance(); // {
        self.bracket_depth += 1;
        self.skip_space();

        let expression = if self.peek_keyword("for") {
            self.for_object()?
        } else {
            self.object()?
        };

        self.bracket_depth -= 1;
        Ok(expression)
    }

    fn tuple(&mut self) -> Result<Expression, ParseError> {
        let mut elements = Vec::new();
        if !self.cursor.eat_char(']') {
            loop {
                elements.push(self.expression()?);
                self.skip_space();
                if self.cursor.eat_char(',') {
                    self.skip_space();
                    if self.cursor.eat_char(']') {
                        break;
                    }
                    continue;
                }
                if self.cursor.eat_char(']') {
                    break;
                }
                return Err(self.fail("\",\" or \"]\""));
            }
        }
        Ok(Expression::TupleValue { elements })
    }

    fn object(&mut self) -> Result<Expression, ParseError> {
        let mut elements = Vec::new();
        loop {
            self.skip_space();
            if self.cursor.eat_char('}') {
                return Ok(Expression::ObjectValue { elements });
            }

            let key = self.scan_identifier()?;
            self.skip_space();
            if !self.cursor.eat_char('=') && !self.cursor.eat_char(':') {
                return Err(self.fail("\"=\""));
            }
            self.skip_space();
            let value = self.expression()?;
            elements.push(ObjectValueElement { key, value });

            // Elements are separated by commas or newlines.
            self.skip_inline();
            match self.cursor.peek() {
                Some(',') | Some('\n') => {
                    self.cursor.advance();
                }
                Some('}') => {}
                _ if self.at_line_comment() => self.skip_line_comment(),
                _ => return Err(self.fail("\",\" or newline or \"}\"")),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # HCL Parser
//!
//! Recursive descent parser for HCL native syntax, working directly on a
//! character [`Cursor`]. There is no separate token stream: heredoc end
//! markers and templates that recurse into expressions make the language
//! context-sensitive, so lexical scanning is modal and lives alongside the
//! grammar (ordered-choice, committed once an alternative consumes input).
//!
//! ## Example
//!
//! ```rust
//! use hcl_parser::parser::Parser;
//!
//! let file = Parser::new("a = 1\n").parse().unwrap();
//! assert_eq!(file.body.len(), 1);
//! ```

mod collections;
mod expressions;
mod for_expr;
mod lexical;
mod postfix;
mod primaries;
mod structure;
mod template;

use crate::cursor::{Cursor, Position};
use crate::error::ParseError;
use config::constants::MAX_NESTING_DEPTH;
use hcl_ast::{ConfigFile, Expression, TemplatePart};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for HCL.
///
/// One parser instance handles one input; each top-level call starts with a
/// fresh heredoc register and failure tracker.
///
/// ## Example
///
/// ```rust
/// use hcl_parser::parser::Parser;
///
/// let file = Parser::new("block \"label\" {}\n").parse().unwrap();
/// assert_eq!(file.body.len(), 1);
/// ```
pub struct Parser<'a> {
    /// Source text (for error messages).
    source: &'a str,
    /// Character cursor over the input.
    cursor: Cursor<'a>,
    /// Bracket nesting depth; newlines count as whitespace when positive.
    bracket_depth: usize,
    /// Expression nesting depth, bounded by `MAX_NESTING_DEPTH`.
    expression_depth: usize,
    /// Heredoc end-marker register, set for the duration of one heredoc body.
    heredoc_marker: Option<String>,
    /// Farthest failure position seen so far.
    farthest: Position,
    /// Productions expected at the farthest failure position.
    farthest_expected: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            cursor: Cursor::new(input),
            bracket_depth: 0,
            expression_depth: 0,
            heredoc_marker: None,
            farthest: Position::zero(),
            farthest_expected: Vec::new(),
        }
    }

    /// Parse the entire input as a configuration file.
    pub fn parse(mut self) -> Result<ConfigFile, ParseError> {
        self.config_file()
    }

    /// Parse the entire input as a single expression.
    ///
    /// Newlines are treated as plain whitespace, as inside brackets.
    pub fn parse_expression(mut self) -> Result<Expression, ParseError> {
        self.bracket_depth += 1;
        let expression = {
            self.skip_space();
            let expression = self.expression()?;
            self.skip_space();
            expression
        };
        if !self.cursor.is_eof() {
            return Err(self.fail("end of input"));
        }
        Ok(expression)
    }

    /// Parse the entire input as a bare template body.
    pub fn parse_template(mut self) -> Result<Vec<TemplatePart>, ParseError> {
        let parts = self.template_parts(template::TemplateContext::Heredoc)?;
        if !self.cursor.is_eof() {
            return Err(self.fail("end of input"));
        }
        Ok(parts)
    }

    // =========================================================================
    // WHITESPACE
    // =========================================================================

    /// Skip the whitespace class for the current bracket depth.
    ///
    /// Spaces, tabs, carriage returns, and `/* */` comments (even spanning
    /// newlines) are always whitespace. Newlines and line comments join the
    /// class only inside brackets, where the grammar is not line-sensitive.
    pub(crate) fn skip_space(&mut self) {
        self.skip(self.bracket_depth > 0);
    }

    /// Skip inline whitespace only, regardless of bracket depth.
    pub(crate) fn skip_inline(&mut self) {
        self.skip(false);
    }

    /// Skip whitespace, newlines, and comments between body elements.
    pub(crate) fn skip_blank(&mut self) {
        self.skip(true);
    }

    fn skip(&mut self, newlines: bool) {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.cursor.advance();
                }
                Some('\n') if newlines => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.starts_with("/*") => {
                    self.skip_block_comment();
                }
                Some('/') if newlines && self.cursor.starts_with("//") => {
                    self.skip_line_comment();
                }
                Some('#') if newlines => {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.cursor.eat("/*");
        while !self.cursor.is_eof() {
            if self.cursor.eat("*/") {
                return;
            }
            self.cursor.advance();
        }
    }

    /// Consume a `//` or `#` comment through its terminating newline.
    pub(crate) fn skip_line_comment(&mut self) {
        self.cursor.advance_while(|c| c != '\n');
        self.cursor.advance();
    }

    /// Whether the cursor sits at a `//` or `#` line comment.
    pub(crate) fn at_line_comment(&self) -> bool {
        self.cursor.starts_with("//") || self.cursor.peek() == Some('#')
    }

    /// Consume the terminator ending an attribute or block: a newline, a
    /// line comment, or end of input.
    pub(crate) fn expect_terminator(&mut self) -> Result<(), ParseError> {
        self.skip_inline();
        match self.cursor.peek() {
            None => Ok(()),
            Some('\n') => {
                self.cursor.advance();
                Ok(())
            }
            _ if self.at_line_comment() => {
                self.skip_line_comment();
                Ok(())
            }
            _ => Err(self.fail("newline")),
        }
    }

    // =========================================================================
    // EXPRESSION DEPTH GUARD
    // =========================================================================

    /// Parse a full expression (conditional level), guarding recursion depth.
    pub(crate) fn expression(&mut self) -> Result<Expression, ParseError> {
        if self.expression_depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::message_at(
                self.cursor.position(),
                format!("expression nesting exceeds {MAX_NESTING_DEPTH} levels"),
            ));
        }
        self.expression_depth += 1;
        let result = self.conditional();
        self.expression_depth -= 1;
        result
    }

    // =========================================================================
    // FAILURE TRACKING
    // =========================================================================

    /// Record an expectation at the current position and build the error for
    /// the farthest failure seen so far.
    pub(crate) fn fail(&mut self, expected: &str) -> ParseError {
        self.fail_at(self.cursor.position(), expected)
    }

    /// Record an expectation at `position` and build the farthest-failure
    /// error.
    pub(crate) fn fail_at(&mut self, position: Position, expected: &str) -> ParseError {
        if position.byte > self.farthest.byte {
            self.farthest = position;
            self.farthest_expected.clear();
        }
        if position.byte == self.farthest.byte {
            let expected = expected.to_string();
            if !self.farthest_expected.contains(&expected) {
                self.farthest_expected.push(expected);
            }
        }
        let found = match self.char_at(self.farthest.byte) {
            Some(c) => format!("'{}'", c.escape_default()),
            None => "end of input".to_string(),
        };
        ParseError::expected(self.farthest, &found, self.farthest_expected.clone())
    }

    fn char_at(&self, byte: usize) -> Option<char> {
        self.source[byte..].chars().next()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        let file = Parser::new("").parse().unwrap();
        assert!(file.body.is_empty());
    }

    #[test]
    fn test_parse_whitespace_and_comments_only() {
        let file = Parser::new("\n\n// line\n# another\n/* block\ncomment */\n")
            .parse()
            .unwrap();
        assert!(file.body.is_empty());
    }

    #[test]
    fn test_error_reports_one_based_position() {
        let error = Parser::new("a = 1\nb = ?\n").parse().unwrap_err();
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 5);
    }

    #[test]
    fn test_expression_nesting_limit() {
        let deep = format!("a = {}1{}\n", "(".repeat(1000), ")".repeat(1000));
        let error = Parser::new(&deep).parse().unwrap_err();
        assert!(error.message.contains("nesting"));
    }

    #[test]
    fn test_parse_expression_entry_point() {
        let expression = Parser::new(" 1 +\n 2 ").parse_expression().unwrap();
        assert!(matches!(expression, Expression::BinaryOperator { .. }));
    }
}

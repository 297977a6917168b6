//! # Structure Parsing
//!
//! Top-level productions: the configuration file, attributes, blocks, and
//! one-line blocks.
//!
//! ## Grammar
//!
//! ```text
//! config_file    = blank body_element*
//! body_element   = attribute | block | one_line_block
//! attribute      = identifier "=" expression terminator
//! block          = identifier label* "{" (newline body)? "}" terminator
//! one_line_block = identifier label* "{" attribute "}" terminator
//! label          = identifier | string
//! terminator     = newline | line_comment | eof
//! ```
//!
//! `block` and `one_line_block` share a prefix; after the opening brace the
//! next significant character decides: a closing brace is an empty block, a
//! newline or line comment starts a multi-line body, anything else must be
//! the one-line form's single attribute.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::validate::is_identifier_start;
use hcl_ast::{Attribute, Block, BodyElement, ConfigFile, Identifier, Label, OneLineBlock};

impl<'a> Parser<'a> {
    /// Parse the whole input as a configuration file.
    pub(crate) fn config_file(&mut self) -> Result<ConfigFile, ParseError> {
        let mut body = Vec::new();
        self.skip_blank();
        while !self.cursor.is_eof() {
            body.push(self.body_element()?);
            self.skip_blank();
        }
        Ok(ConfigFile::with_body(body))
    }

    /// Parse one body element: attribute, block, or one-line block.
    pub(crate) fn body_element(&mut self) -> Result<BodyElement, ParseError> {
        let name = self.scan_identifier()?;
        self.skip_inline();

        if self.cursor.peek() == Some('=') && !self.cursor.starts_with("==") {
            self.cursor.advance();
            self.skip_inline();
            let value = self.expression()?;
            self.expect_terminator()?;
            return Ok(BodyElement::Attribute(Attribute { name, value }));
        }

        self.block_body(name)
    }

    /// Parse the labels and body of a block whose type is already consumed.
    fn block_body(&mut self, block_type: Identifier) -> Result<BodyElement, ParseError> {
        let labels = self.labels()?;

        self.cursor.advance(); // {
        self.skip_inline();
        match self.cursor.peek() {
            // `type labels {}` is an empty multi-line block.
            Some('}') => {
                self.cursor.advance();
                self.expect_terminator()?;
                Ok(BodyElement::Block(Block { block_type, labels, bodies: vec![] }))
            }
            Some('\n') => {
                self.cursor.advance();
                self.finish_multi_line_block(block_type, labels)
            }
            _ if self.at_line_comment() => {
                self.skip_line_comment();
                self.finish_multi_line_block(block_type, labels)
            }
            Some(_) => self.finish_one_line_block(block_type, labels),
            None => Err(self.fail("\"}\"")),
        }
    }

    fn labels(&mut self) -> Result<Vec<Label>, ParseError> {
        let mut labels = Vec::new();
        loop {
            self.skip_inline();
            match self.cursor.peek() {
                Some('{') => return Ok(labels),
                Some('"') => labels.push(Label::StringLiteral(self.scan_string_literal()?)),
                Some(c) if is_identifier_start(c) => {
                    labels.push(Label::Identifier(self.scan_identifier()?));
                }
                _ => return Err(self.fail("label or \"{\"")),
            }
        }
    }

    fn finish_multi_line_block(
        &mut self,
        block_type: Identifier,
        labels: Vec<Label>,
    ) -> Result<BodyElement, ParseError> {
        let mut bodies = Vec::new();
        loop {
            self.skip_blank();
            match self.cursor.peek() {
                Some('}') => {
                    self.cursor.advance();
                    self.expect_terminator()?;
                    return Ok(BodyElement::Block(Block { block_type, labels, bodies }));
                }
                None => return Err(self.fail("\"}\"")),
                _ => bodies.push(self.body_element()?),
            }
        }
    }

    fn finish_one_line_block(
        &mut self,
        block_type: Identifier,
        labels: Vec<Label>,
    ) -> Result<BodyElement, ParseError> {
        let name = self.scan_identifier()?;
        self.skip_inline();
        if !self.cursor.eat_char('=') {
            return Err(self.fail("\"=\""));
        }
        self.skip_inline();
        let value = self.expression()?;
        self.skip_inline();
        if !self.cursor.eat_char('}') {
            return Err(self.fail("\"}\""));
        }
        self.expect_terminator()?;
        Ok(BodyElement::OneLineBlock(OneLineBlock {
            block_type,
            labels,
            attribute: Some(Attribute { name, value }),
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================

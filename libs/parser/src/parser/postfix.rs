//! # Postfix Expression Parsing
//!
//! The postfix chain over a primary term: index, legacy numeric index,
//! attribute access, and both splat forms. An explicit loop threads the
//! accumulated expression into each new node's `target`, folding left.
//!
//! ## Grammar
//!
//! ```text
//! postfix    = primary operation*
//! operation  = "[" expression "]"      index
//!            | "[" "*" "]" full_op*    full splat
//!            | "." digits              legacy index
//!            | "." identifier          attribute access
//!            | "." "*" attr_op*        attribute splat
//! attr_op    = "." identifier
//! full_op    = "." identifier | "[" expression "]"
//! ```
//!
//! Three dots never start an operation; `...` belongs to the enclosing
//! object for-expression.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::validate::is_identifier_start;
use hcl_ast::{Expression, SplatGetAttribute, SplatOperation, SplatOperator};

impl<'a> Parser<'a> {
    /// Parse a primary term and any number of postfix operations.
    pub(crate) fn postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.primary()?;

        loop {
            let checkpoint = self.cursor.checkpoint();
            self.skip_space();
            match self.cursor.peek() {
                Some('[') => {
                    expression = self.bracket_operation(expression)?;
                }
                Some('.') if !self.cursor.starts_with("...") => {
                    expression = self.dot_operation(expression)?;
                }
                _ => {
                    self.cursor.rewind(checkpoint);
                    return Ok(expression);
                }
            }
        }
    }

    /// Parse `[expr]` or `[*]` with its trailing full-splat operations.
    fn bracket_operation(&mut self, target: Expression) -> Result<Expression, ParseError> {
        self.cursor.advance(); // [
        self.bracket_depth += 1;
        self.skip_space();

        if self.cursor.eat_char('*') {
            self.skip_space();
            if !self.cursor.eat_char(']') {
                return Err(self.fail("\"]\""));
            }
            self.bracket_depth -= 1;
            let operations = self.full_splat_operations()?;
            return Ok(Expression::SplatOperator(Box::new(SplatOperator::Full {
                operations,
                target,
            })));
        }

        let key = self.expression()?;
        self.skip_space();
        if !self.cursor.eat_char(']') {
            return Err(self.fail("\"]\""));
        }
        self.bracket_depth -= 1;
        Ok(Expression::IndexOperator { key: Box::new(key), target: Box::new(target) })
    }

    /// Parse `.digits`, `.identifier`, or `.*` with its attribute chain.
    fn dot_operation(&mut self, target: Expression) -> Result<Expression, ParseError> {
        self.cursor.advance(); // .

        if self.cursor.eat_char('*') {
            let attributes = self.attr_splat_attributes()?;
            return Ok(Expression::SplatOperator(Box::new(SplatOperator::Attribute {
                attributes,
                target,
            })));
        }

        match self.cursor.peek() {
            Some(c) if c.is_ascii_digit() => {
                let key = self.scan_integer()?;
                Ok(Expression::LegacyIndexOperator { key, target: Box::new(target) })
            }
            Some(c) if is_identifier_start(c) => {
                let key = self.scan_identifier()?;
                Ok(Expression::GetAttributeOperator { key, target: Box::new(target) })
            }
            _ => Err(self.fail("attribute name")),
        }
    }

    /// Collect the `.ident` chain of an attribute splat.
    fn attr_splat_attributes(&mut self) -> Result<Vec<SplatGetAttribute>, ParseError> {
        let mut attributes = Vec::new();
        loop {
            let checkpoint = self.cursor.checkpoint();
            self.skip_space();
            if self.at_attribute_step() {
                self.cursor.advance(); // .
                attributes.push(SplatGetAttribute { key: self.scan_identifier()? });
            } else {
                self.cursor.rewind(checkpoint);
                return Ok(attributes);
            }
        }
    }

    /// Collect the `.ident` / `[expr]` chain of a full splat.
    fn full_splat_operations(&mut self) -> Result<Vec<SplatOperation>, ParseError> {
        let mut operations = Vec::new();
        loop {
            let checkpoint = self.cursor.checkpoint();
            self.skip_space();
            if self.at_attribute_step() {
                self.cursor.advance(); // .
                operations.push(SplatOperation::GetAttribute { key: self.scan_identifier()? });
            } else if self.cursor.peek() == Some('[') {
                self.cursor.advance();
                self.bracket_depth += 1;
                self.skip_space();
                let key = self.expression()?;
                self.skip_space();
                if !self.cursor.eat_char(']') {
                    return Err(self.fail("\"]\""));
                }
                self.bracket_depth -= 1;
                operations.push(SplatOperation::Index { key });
            } else {
                self.cursor.rewind(checkpoint);
                return Ok(operations);
            }
        }
    }

    /// Whether a `.identifier` step starts here.
    fn at_attribute_step(&self) -> bool {
        self.cursor.peek() == Some('.')
            && !self.cursor.starts_with("...")
            && self.cursor.peek_second().map_or(false, is_identifier_start)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(input: &str) -> Expression {
        Parser::new(input).parse_expression().unwrap()
    }

    #[test]
    fn test_parse_index() {
        match parse_expr("xs[0]") {
            Expression::IndexOperator { target, .. } => {
                assert!(matches!(*target, Expression::VariableExpression { .. }));
            }
            other => panic!("expected index, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_attribute_access_chain() {
        // var.name folds left: the outer node is `.name`.
        match parse_expr("var.instance.name") {
            Expression::GetAttributeOperator { key, target } => {
                assert_eq!(key.value, "name");
                assert!(matches!(*target, Expression::GetAttributeOperator { .. }));
            }
            other => panic!("expected attribute access, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_legacy_index() {
        match parse_expr("xs.0") {
            Expression::LegacyIndexOperator { key, .. } => assert_eq!(key.value, 0.0),
            other => panic!("expected legacy index, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_legacy_index_chain() {
        // xs.0.1 is two legacy indexes, not a fraction.
        match parse_expr("xs.0.1") {
            Expression::LegacyIndexOperator { key, target } => {
                assert_eq!(key.value, 1.0);
                assert!(matches!(*target, Expression::LegacyIndexOperator { .. }));
            }
            other => panic!("expected legacy index, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_attr_splat() {
        match parse_expr("instances.*.id.name") {
            Expression::SplatOperator(splat) => match *splat {
                SplatOperator::Attribute { attributes, .. } => {
                    assert_eq!(attributes.len(), 2);
                    assert_eq!(attributes[0].key.value, "id");
                    assert_eq!(attributes[1].key.value, "name");
                }
                other => panic!("expected attribute splat, got {other:?}"),
            },
            other => panic!("expected splat, got {other:?}"),
        }
    }

    #[test]
    fn test_attr_splat_stops_before_index() {
        // The index applies to the splat result, outside the splat scope.
        match parse_expr("instances.*.id[0]") {
            Expression::IndexOperator { target, .. } => {
                assert!(matches!(*target, Expression::SplatOperator(_)));
            }
            other => panic!("expected index over splat, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_full_splat() {
        match parse_expr("instances[*].tags[0]") {
            Expression::SplatOperator(splat) => match *splat {
                SplatOperator::Full { operations, .. } => {
                    assert_eq!(operations.len(), 2);
                    assert!(matches!(operations[0], SplatOperation::GetAttribute { .. }));
                    assert!(matches!(operations[1], SplatOperation::Index { .. }));
                }
                other => panic!("expected full splat, got {other:?}"),
            },
            other => panic!("expected splat, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_after_function_call() {
        match parse_expr("lookup(m, k)[2].field") {
            Expression::GetAttributeOperator { target, .. } => {
                assert!(matches!(*target, Expression::IndexOperator { .. }));
            }
            other => panic!("expected attribute access, got {other:?}"),
        }
    }

    #[test]
    fn test_dot_without_name_is_an_error() {
        assert!(Parser::new("xs.").parse_expression().is_err());
    }
}

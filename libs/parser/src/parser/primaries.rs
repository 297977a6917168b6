//! # Primary Expression Parsing
//!
//! Primary terms of the expression grammar, tried in order on the first
//! character: quoted template, heredoc template, parenthesized expression,
//! tuple or for-expression, object or for-expression, number literal, and
//! identifier-led terms (`true`/`false`/`null`, function call, variable).

use super::Parser;
use crate::error::ParseError;
use hcl_ast::validate::is_identifier_start;
use hcl_ast::{BooleanLiteral, Expression, NullLiteral};

impl<'a> Parser<'a> {
    /// Parse a primary term.
    ///
    /// ## Example
    ///
    /// ```text
    /// "a ${b}"
    /// <<EOF ... EOF
    /// (1 + 2)
    /// [1, 2]     { a = 1 }
    /// [for ...]  {for ...}
    /// 3.14
    /// true  null  var  fn(x)
    /// ```
    pub(crate) fn primary(&mut self) -> Result<Expression, ParseError> {
        match self.cursor.peek() {
            Some('"') => self.quoted_template(),
            Some('<') if self.cursor.starts_with("<<") => self.heredoc_template(),
            Some('(') => self.parenthesized(),
            Some('[') => self.tuple_or_for(),
            Some('{') => self.object_or_for(),
            Some(c) if c.is_ascii_digit() => Ok(Expression::NumberLiteral(self.scan_number()?)),
            Some(c) if is_identifier_start(c) => self.identifier_led(),
            _ => Err(self.fail("expression")),
        }
    }

    fn parenthesized(&mut self) -> Result<Expression, ParseError> {
        self.cursor.advance(); // (
        self.bracket_depth += 1;
        self.skip_space();
        let expression = self.expression()?;
        self.skip_space();
        if !self.cursor.eat_char(')') {
            return Err(self.fail("\")\""));
        }
        self.bracket_depth -= 1;
        Ok(Expression::ParenthesizedExpression { expression: Box::new(expression) })
    }

    /// Parse a term starting with an identifier: a keyword literal, a
    /// function call, or a variable reference.
    fn identifier_led(&mut self) -> Result<Expression, ParseError> {
        if self.eat_keyword("true") {
            return Ok(Expression::BooleanLiteral(BooleanLiteral { value: true }));
        }
        if self.eat_keyword("false") {
            return Ok(Expression::BooleanLiteral(BooleanLiteral { value: false }));
        }
        if self.eat_keyword("null") {
            return Ok(Expression::NullLiteral(NullLiteral { value: () }));
        }

        let name = self.scan_identifier()?;

        let checkpoint = self.cursor.checkpoint();
        self.skip_space();
        if self.cursor.eat_char('(') {
            return self.function_call(name);
        }
        self.cursor.rewind(checkpoint);
        Ok(Expression::VariableExpression { name })
    }

    /// Parse the arguments of a function call; the opening parenthesis is
    /// already consumed.
    fn function_call(&mut self, name: hcl_ast::Identifier) -> Result<Expression, ParseError> {
        self.bracket_depth += 1;
        self.skip_space();
        let mut args = Vec::new();
        if !self.cursor.eat_char(')') {
            loop {
                args.push(self.expression()?);
                self.skip_space();
                if self.cursor.eat_char(',') {
                    self.skip_space();
                    // Trailing comma before the close.
                    if self.cursor.eat_char(')') {
                        break;
                    }
                    continue;
                }
                if self.cursor.eat_char(')') {
                    break;
                }
                return Err(self.fail("\",\" or \")\""));
            }
        }
        self.bracket_depth -= 1;
        Ok(Expression::FunctionCallExpression { name, args })
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
    fn test_parse_boolean_and_null() {
        assert_eq!(
            parse_expr("true"),
            Expression::BooleanLiteral(BooleanLiteral { value: true })
        );
        assert_eq!(parse_expr("null"), Expression::NullLiteral(NullLiteral { value: () }));
    }

    #[test]
    fn test_keyword_prefix_is_a_variable() {
        match parse_expr("nullable") {
            Expression::VariableExpression { name } => assert_eq!(name.value, "nullable"),
            other => panic!("expected variable, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_function_call() {
        match parse_expr("max(1, 2, 3)") {
            Expression::FunctionCallExpression { name, args } => {
                assert_eq!(name.value, "max");
                assert_eq!(args.len(), 3);
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_function_call_empty_and_trailing_comma() {
        match parse_expr("f()") {
            Expression::FunctionCallExpression { args, .. } => assert!(args.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
        match parse_expr("f(1, 2,)") {
            Expression::FunctionCallExpression { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_call_with_newlines_in_args() {
        match parse_expr("join(\n  \",\",\n  xs,\n)") {
            Expression::FunctionCallExpression { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_parenthesized_keeps_node() {
        assert!(matches!(parse_expr("(x)"), Expression::ParenthesizedExpression { .. }));
    }
}

//! # Template Parsing
//!
//! Quoted templates, heredoc templates, interpolations, and the `%{if}` /
//! `%{for}` directives. Templates recurse into expressions, which recurse
//! back into templates.
//!
//! A literal segment accumulates characters until `${`, `%{`, the closing
//! quote, or (in heredocs) the end-marker line. `$${` and `%%{` escape the
//! interpolation and directive starts; quoted templates additionally decode
//! backslash escapes, heredoc bodies keep backslashes verbatim.
//!
//! Heredoc context sensitivity is handled by a single marker register: the
//! opening identifier is stored for the duration of the body, and a
//! zero-width lookahead at each line start recognizes the terminating
//! `ws* MARKER` line without consuming it into the body.

use super::Parser;
use crate::error::ParseError;
use hcl_ast::{
    Expression, HeredocTemplateExpression, QuotedTemplateExpression, Strip, StripMarkers,
    TemplateFor, TemplateForIntro, TemplateForStrip, TemplateIf, TemplateIfStrip, TemplateLiteral,
    TemplateInterpolation, TemplatePart,
};

/// Where a template body lives; decides terminators and escape handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateContext {
    /// Inside `"..."`; ends at the closing quote, backslash escapes decode.
    Quoted,
    /// A heredoc body or bare template; ends at the marker line (when a
    /// marker is registered) or EOF, backslashes stay verbatim.
    Heredoc,
}

/// What a `%{` head introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    If,
    Else,
    Endif,
    For,
    Endfor,
    Unknown,
}

impl<'a> Parser<'a> {
    // =========================================================================
    // ENTRY POINTS
    // =========================================================================

    /// Parse a quoted template; the cursor sits on the opening quote.
    pub(crate) fn quoted_template(&mut self) -> Result<Expression, ParseError> {
        self.cursor.advance(); // "
        let parts = self.template_parts(TemplateContext::Quoted)?;
        if !self.cursor.eat_char('"') {
            return Err(self.fail("closing '\"'"));
        }
        Ok(Expression::QuotedTemplateExpression(QuotedTemplateExpression { parts }))
    }

    /// Parse a heredoc template; the cursor sits on `<<`.
    pub(crate) fn heredoc_template(&mut self) -> Result<Expression, ParseError> {
        self.cursor.eat("<<");
        let strip_indent = self.cursor.eat_char('-');
        let marker = self.scan_identifier().map_err(|_| self.fail("heredoc marker"))?;
        self.cursor.advance_while(|c| c == ' ' || c == '\t' || c == '\r');
        if !self.cursor.eat_char('\n') {
            return Err(self.fail("newline after heredoc marker"));
        }

        // The register holds at most one marker; heredocs do not nest, but an
        // interpolated expression may open its own, so save and restore.
        let saved = self.heredoc_marker.replace(marker.value.clone());
        let result = self.template_parts(TemplateContext::Heredoc).and_then(|template| {
            self.consume_heredoc_end()?;
            Ok(template)
        });
        self.heredoc_marker = saved;

        let template = result?;
        Ok(Expression::HeredocTemplateExpression(HeredocTemplateExpression {
            marker,
            strip_indent,
            template,
        }))
    }

    // =========================================================================
    // TEMPLATE BODY
    // =========================================================================

    /// Parse template parts up to the context terminator or an `%{else}` /
    /// `%{endif}` / `%{endfor}` head, consuming neither.
    pub(crate) fn template_parts(
        &mut self,
        context: TemplateContext,
    ) -> Result<Vec<TemplatePart>, ParseError> {
        let mut parts = Vec::new();
        loop {
            if self.at_template_end(context) {
                return Ok(parts);
            }
            if self.cursor.starts_with("${") {
                parts.push(self.template_interpolation()?);
                continue;
            }
            if self.cursor.starts_with("%{") {
                match self.peek_directive_kind() {
                    DirectiveKind::If => parts.push(self.template_if(context)?),
                    DirectiveKind::For => parts.push(self.template_for(context)?),
                    DirectiveKind::Else | DirectiveKind::Endif | DirectiveKind::Endfor => {
                        return Ok(parts);
                    }
                    DirectiveKind::Unknown => {
                        return Err(self.fail("\"if\" or \"for\" directive"));
                    }
                }
                continue;
            }
            let literal = self.template_literal(context)?;
            if !literal.is_empty() {
                parts.push(TemplatePart::TemplateLiteral(TemplateLiteral::new(literal)));
            }
        }
    }

    /// Whether the context terminator is next: the closing quote, the
    /// heredoc end-marker line, or end of input.
    fn at_template_end(&self, context: TemplateContext) -> bool {
        if self.cursor.is_eof() {
            return true;
        }
        match context {
            TemplateContext::Quoted => self.cursor.peek() == Some('"'),
            TemplateContext::Heredoc => self.at_heredoc_end(),
        }
    }

    /// Zero-width test for the heredoc end-marker line, either directly at a
    /// line start or just before the newline that introduces it.
    fn at_heredoc_end(&self) -> bool {
        let Some(marker) = &self.heredoc_marker else {
            return false;
        };
        let rest = self.cursor.rest();
        if self.cursor.at_line_start() && Self::is_marker_line(rest, marker) {
            return true;
        }
        match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            Some(after) => Self::is_marker_line(after, marker),
            None => false,
        }
    }

    fn is_marker_line(line: &str, marker: &str) -> bool {
        let trimmed = line.trim_start_matches([' ', '\t']);
        let Some(after) = trimmed.strip_prefix(marker) else {
            return false;
        };
        let after = after.trim_start_matches([' ', '\t', '\r']);
        after.is_empty() || after.starts_with('\n')
    }

    /// Consume the newline before the marker line (when present), the
    /// leading whitespace, and the marker itself. The terminator after the
    /// marker is left for the caller.
    fn consume_heredoc_end(&mut self) -> Result<(), ParseError> {
        let marker = self.heredoc_marker.clone().unwrap_or_default();
        let marker_is_next =
            self.cursor.at_line_start() && Self::is_marker_line(self.cursor.rest(), &marker);
        if !marker_is_next && !self.cursor.eat("\r\n") {
            self.cursor.eat("\n");
        }
        self.cursor.advance_while(|c| c == ' ' || c == '\t');
        if !self.cursor.eat(&marker) {
            return Err(self.fail("heredoc end marker"));
        }
        Ok(())
    }

    /// Accumulate one run of literal text. Always consumes at least one
    /// character unless a terminator or part opener is next.
    fn template_literal(&mut self, context: TemplateContext) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            if self.at_template_end(context) {
                return Ok(value);
            }
            if self.cursor.eat("$${") {
                value.push_str("${");
                continue;
            }
            if self.cursor.eat("%%{") {
                value.push_str("%{");
                continue;
            }
            if self.cursor.starts_with("${") || self.cursor.starts_with("%{") {
                return Ok(value);
            }
            match self.cursor.peek() {
                None => return Ok(value),
                Some('"') if context == TemplateContext::Quoted => return Ok(value),
                Some('\n') if context == TemplateContext::Quoted => {
                    return Err(self.fail("closing '\"'"));
                }
                Some('\\') if context == TemplateContext::Quoted => {
                    self.cursor.advance();
                    value.push(self.scan_escape()?);
                }
                Some('\r')
                    if context == TemplateContext::Heredoc
                        && self.cursor.starts_with("\r\n") =>
                {
                    // Normalize CRLF inside heredoc bodies.
                    self.cursor.eat("\r\n");
                    value.push('\n');
                }
                Some(c) => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    // =========================================================================
    // INTERPOLATION
    // =========================================================================

    /// Parse `${ ~? expression ~? }`.
    fn template_interpolation(&mut self) -> Result<TemplatePart, ParseError> {
        self.cursor.eat("${");
        let left = self.cursor.eat_char('~');
        self.bracket_depth += 1;
        self.skip_space();
        let expression = self.expression()?;
        self.skip_space();
        let right = self.cursor.eat_char('~');
        if !self.cursor.eat_char('}') {
            return Err(self.fail("\"}\""));
        }
        self.bracket_depth -= 1;
        Ok(TemplatePart::TemplateInterpolation(TemplateInterpolation {
            expression,
            strip: Strip { left, right },
        }))
    }

    // =========================================================================
    // DIRECTIVES
    // =========================================================================

    /// Identify the keyword of the `%{` head ahead without consuming it.
    fn peek_directive_kind(&mut self) -> DirectiveKind {
        let checkpoint = self.cursor.checkpoint();
        self.cursor.eat("%{");
        self.cursor.eat_char('~');
        self.skip(true);
        let kind = if self.peek_keyword("if") {
            DirectiveKind::If
        } else if self.peek_keyword("else") {
            DirectiveKind::Else
        } else if self.peek_keyword("endif") {
            DirectiveKind::Endif
        } else if self.peek_keyword("for") {
            DirectiveKind::For
        } else if self.peek_keyword("endfor") {
            DirectiveKind::Endfor
        } else {
            DirectiveKind::Unknown
        };
        self.cursor.rewind(checkpoint);
        kind
    }

    /// Parse `%{if cond} then %{else} else %{endif}`.
    fn template_if(&mut self, context: TemplateContext) -> Result<TemplatePart, ParseError> {
        let (if_marks, condition) = self.directive_head("if", |parser| {
            parser.skip_space();
            parser.expression()
        })?;
        let then = self.template_parts(context)?;

        let (else_marks, else_parts) = if self.peek_directive_kind() == DirectiveKind::Else {
            let (marks, ()) = self.directive_head("else", |_| Ok(()))?;
            (Some(marks), Some(self.template_parts(context)?))
        } else {
            (None, None)
        };

        if self.peek_directive_kind() != DirectiveKind::Endif {
            return Err(self.fail("\"%{endif}\""));
        }
        let (endif, ()) = self.directive_head("endif", |_| Ok(()))?;

        Ok(TemplatePart::TemplateIf(TemplateIf {
            condition,
            then,
            else_branch: else_parts,
            strip: TemplateIfStrip { if_marks, else_marks, endif },
        }))
    }

    /// Parse `%{for key (, value)? in collection} body %{endfor}`.
    fn template_for(&mut self, context: TemplateContext) -> Result<TemplatePart, ParseError> {
        let (for_marks, intro) = self.directive_head("for", |parser| {
            parser.skip_space();
            let key = parser.scan_identifier()?;
            parser.skip_space();
            let value = if parser.cursor.eat_char(',') {
                parser.skip_space();
                let value = parser.scan_identifier()?;
                parser.skip_space();
                Some(value)
            } else {
                None
            };
            if !parser.eat_keyword("in") {
                return Err(parser.fail("\"in\""));
            }
            parser.skip_space();
            let collection = parser.expression()?;
            Ok(TemplateForIntro { key, value, collection })
        })?;
        let body = self.template_parts(context)?;

        if self.peek_directive_kind() != DirectiveKind::Endfor {
            return Err(self.fail("\"%{endfor}\""));
        }
        let (endfor, ()) = self.directive_head("endfor", |_| Ok(()))?;

        Ok(TemplatePart::TemplateFor(TemplateFor {
            intro,
            body,
            strip: TemplateForStrip { for_marks, endfor },
        }))
    }

    /// Parse one `%{ ~? keyword ... ~? }` head. The payload closure parses
    /// whatever follows the keyword.
    fn directive_head<T>(
        &mut self,
        keyword: &str,
        payload: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<(StripMarkers, T), ParseError> {
        self.cursor.eat("%{");
        let start = self.cursor.eat_char('~');
        self.bracket_depth += 1;
        self.skip_space();
        if !self.eat_keyword(keyword) {
            return Err(self.fail(keyword));
        }
        let value = payload(self)?;
        self.skip_space();
        let end = self.cursor.eat_char('~');
        if !self.cursor.eat_char('}') {
            return Err(self.fail("\"}\""));
        }
        self.bracket_depth -= 1;
        Ok((StripMarkers { start, end }, value))
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

    fn quoted_parts(input: &str) -> Vec<TemplatePart> {
        match parse_expr(input) {
            Expression::QuotedTemplateExpression(template) => template.parts,
            other => panic!("expected quoted template, got {other:?}"),
        }
    }

    fn literal(value: &str) -> TemplatePart {
        TemplatePart::TemplateLiteral(TemplateLiteral::new(value))
    }

    #[test]
    fn test_empty_quoted_template() {
        assert!(quoted_parts("\"\"").is_empty());
    }

    #[test]
    fn test_plain_literal() {
        assert_eq!(quoted_parts("\"value\""), vec![literal("value")]);
    }

    #[test]
    fn test_interpolation_between_literals() {
        let parts = quoted_parts("\"Hello, ${name}!\"");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], literal("Hello, "));
        match &parts[1] {
            TemplatePart::TemplateInterpolation(interpolation) => {
                assert!(matches!(
                    interpolation.expression,
                    Expression::VariableExpression { .. }
                ));
                assert_eq!(interpolation.strip, Strip::default());
            }
            other => panic!("expected interpolation, got {other:?}"),
        }
        assert_eq!(parts[2], literal("!"));
    }

    #[test]
    fn test_interpolation_strip_markers() {
        let parts = quoted_parts("\"a${~ x ~}b\"");
        match &parts[1] {
            TemplatePart::TemplateInterpolation(interpolation) => {
                assert_eq!(interpolation.strip, Strip { left: true, right: true });
            }
            other => panic!("expected interpolation, got {other:?}"),
        }
    }

    #[test]
    fn test_dollar_and_percent_escapes() {
        assert_eq!(quoted_parts(r#""$${a} %%{b} $5 50%""#), vec![literal("${a} %{b} $5 50%")]);
    }

    #[test]
    fn test_backslash_escapes_in_quoted_literal() {
        assert_eq!(quoted_parts(r#""a\nb\"c""#), vec![literal("a\nb\"c")]);
    }

    #[test]
    fn test_template_if_with_else() {
        let parts = quoted_parts("\"%{if x > 1}big%{else}small%{endif}\"");
        match &parts[0] {
            TemplatePart::TemplateIf(template_if) => {
                assert!(matches!(
                    template_if.condition,
                    Expression::BinaryOperator { .. }
                ));
                assert_eq!(template_if.then, vec![literal("big")]);
                assert_eq!(template_if.else_branch.as_deref(), Some(&[literal("small")][..]));
                assert!(template_if.strip.else_marks.is_some());
            }
            other => panic!("expected if directive, got {other:?}"),
        }
    }

    #[test]
    fn test_template_if_without_else() {
        let parts = quoted_parts("\"%{if ok}yes%{endif}\"");
        match &parts[0] {
            TemplatePart::TemplateIf(template_if) => {
                assert!(template_if.else_branch.is_none());
                assert!(template_if.strip.else_marks.is_none());
            }
            other => panic!("expected if directive, got {other:?}"),
        }
    }

    #[test]
    fn test_template_for_directive() {
        let parts = quoted_parts("\"%{~for k, v in m~}${k}%{endfor~}\"");
        match &parts[0] {
            TemplatePart::TemplateFor(template_for) => {
                assert_eq!(template_for.intro.key.value, "k");
                assert_eq!(template_for.intro.value.as_ref().unwrap().value, "v");
                assert_eq!(template_for.body.len(), 1);
                assert_eq!(
                    template_for.strip.for_marks,
                    StripMarkers { start: true, end: true }
                );
                assert_eq!(
                    template_for.strip.endfor,
                    StripMarkers { start: false, end: true }
                );
            }
            other => panic!("expected for directive, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_directive_is_an_error() {
        assert!(Parser::new("\"%{if x}y\"").parse_expression().is_err());
    }

    #[test]
    fn test_unknown_directive_is_an_error() {
        assert!(Parser::new("\"%{unless x}y%{endunless}\"").parse_expression().is_err());
    }

    #[test]
    fn test_nested_template_in_interpolation() {
        let parts = quoted_parts(r#""${upper("x")}""#);
        match &parts[0] {
            TemplatePart::TemplateInterpolation(interpolation) => {
                assert!(matches!(
                    interpolation.expression,
                    Expression::FunctionCallExpression { .. }
                ));
            }
            other => panic!("expected interpolation, got {other:?}"),
        }
    }

    // =========================================================================
    // HEREDOCS
    // =========================================================================

    fn heredoc(input: &str) -> HeredocTemplateExpression {
        match parse_expr(input) {
            Expression::HeredocTemplateExpression(heredoc) => heredoc,
            other => panic!("expected heredoc, got {other:?}"),
        }
    }

    #[test]
    fn test_heredoc_single_line() {
        let heredoc = heredoc("<<EOF\nhello\nEOF");
        assert_eq!(heredoc.marker.value, "EOF");
        assert!(!heredoc.strip_indent);
        assert_eq!(heredoc.template, vec![literal("hello")]);
    }

    #[test]
    fn test_heredoc_multi_line_keeps_inner_newlines() {
        let heredoc = heredoc("<<EOT\na\nb\nEOT");
        assert_eq!(heredoc.template, vec![literal("a\nb")]);
    }

    #[test]
    fn test_heredoc_strip_indent_marker() {
        let heredoc = heredoc("<<-EOF\n  indented\n  EOF");
        assert!(heredoc.strip_indent);
        assert_eq!(heredoc.template, vec![literal("  indented")]);
    }

    #[test]
    fn test_heredoc_empty_body() {
        let heredoc = heredoc("<<EOF\nEOF");
        assert!(heredoc.template.is_empty());
    }

    #[test]
    fn test_heredoc_blank_line_then_end_marker() {
        let heredoc = heredoc("<<EOF\n\nEOF");
        assert!(heredoc.template.is_empty());
    }

    #[test]
    fn test_heredoc_leading_blank_line_is_content() {
        let heredoc = heredoc("<<EOF\n\nhello\nEOF");
        assert_eq!(heredoc.template, vec![literal("\nhello")]);
    }

    #[test]
    fn test_heredoc_with_interpolation() {
        let heredoc = heredoc("<<EOF\nHello, ${name}!\nEOF");
        assert_eq!(heredoc.template.len(), 3);
        assert_eq!(heredoc.template[0], literal("Hello, "));
        assert_eq!(heredoc.template[2], literal("!"));
    }

    #[test]
    fn test_heredoc_marker_must_match() {
        assert!(Parser::new("<<EOF\nhello\nEND").parse_expression().is_err());
    }

    #[test]
    fn test_heredoc_marker_prefix_line_is_content() {
        let heredoc = heredoc("<<EOF\nEOFX\nEOF");
        assert_eq!(heredoc.template, vec![literal("EOFX")]);
    }

    #[test]
    fn test_heredoc_backslashes_stay_verbatim() {
        let heredoc = heredoc("<<EOF\na\\nb\nEOF");
        assert_eq!(heredoc.template, vec![literal("a\\nb")]);
    }

    #[test]
    fn test_heredoc_crlf_normalized() {
        let heredoc = heredoc("<<EOF\r\na\r\nb\r\nEOF");
        assert_eq!(heredoc.template, vec![literal("a\nb")]);
    }
}

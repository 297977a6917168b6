//! # Printer
//!
//! Emits HCL text from an AST in a normalized form: two-space indentation,
//! inline collections, `key = value` object elements. Reparsing the output of
//! [`stringify`] yields a tree equal to the input for every parser-produced
//! AST.
//!
//! ## Example
//!
//! ```rust
//! use hcl_ast::{stringify, ConfigFile};
//!
//! assert_eq!(stringify(&ConfigFile::new()), "");
//! ```

use crate::ast::*;
use config::constants::INDENT_UNIT;

/// Render a configuration file as HCL text.
///
/// Total over valid ASTs and deterministic. Non-finite number literals are a
/// programming error and abort with a diagnostic.
pub fn stringify(file: &ConfigFile) -> String {
    let mut printer = Printer::new();
    printer.file(file);
    printer.out
}

// =============================================================================
// PRINTER
// =============================================================================

/// Stateful emitter tracking the current block nesting level.
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self { out: String::new(), indent: 0 }
    }

    fn file(&mut self, file: &ConfigFile) {
        for element in &file.body {
            self.body_element(element);
            self.out.push('\n');
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT_UNIT);
        }
    }

    // =========================================================================
    // STRUCTURE
    // =========================================================================

    /// Emit one body element at the current indent, without a trailing
    /// newline.
    fn body_element(&mut self, element: &BodyElement) {
        self.push_indent();
        match element {
            BodyElement::Attribute(attribute) => self.attribute(attribute),
            BodyElement::Block(block) => self.block(block),
            BodyElement::OneLineBlock(block) => self.one_line_block(block),
        }
    }

    fn attribute(&mut self, attribute: &Attribute) {
        self.out.push_str(&attribute.name.value);
        self.out.push_str(" = ");
        self.expr(&attribute.value);
    }

    fn block(&mut self, block: &Block) {
        self.block_header(&block.block_type, &block.labels);
        if block.bodies.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for element in &block.bodies {
            self.body_element(element);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.push_indent();
        self.out.push('}');
    }

    fn one_line_block(&mut self, block: &OneLineBlock) {
        self.block_header(&block.block_type, &block.labels);
        match &block.attribute {
            Some(attribute) => {
                self.out.push_str("{ ");
                self.attribute(attribute);
                self.out.push_str(" }");
            }
            // Normalizes to an empty block on reparse.
            None => self.out.push_str("{}"),
        }
    }

    fn block_header(&mut self, block_type: &Identifier, labels: &[Label]) {
        self.out.push_str(&block_type.value);
        self.out.push(' ');
        for label in labels {
            match label {
                Label::Identifier(ident) => self.out.push_str(&ident.value),
                Label::StringLiteral(string) => self.quoted_string(&string.value),
            }
            self.out.push(' ');
        }
    }

    // =========================================================================
    // EXPRESSION DISPATCH
    // =========================================================================

    /// The single expression emitter; every kind dispatches from here.
    fn expr(&mut self, expression: &Expression) {
        match expression {
            Expression::StringLiteral(string) => self.quoted_string(&string.value),
            Expression::NumberLiteral(number) => self.number(number),
            Expression::BooleanLiteral(boolean) => {
                self.out.push_str(if boolean.value { "true" } else { "false" });
            }
            Expression::NullLiteral(_) => self.out.push_str("null"),

            Expression::TupleValue { elements } => self.tuple(elements),
            Expression::ObjectValue { elements } => self.object(elements),

            Expression::QuotedTemplateExpression(template) => self.quoted_template(template),
            Expression::HeredocTemplateExpression(heredoc) => self.heredoc(heredoc),

            Expression::FunctionCallExpression { name, args } => {
                self.out.push_str(&name.value);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
            Expression::VariableExpression { name } => self.out.push_str(&name.value),

            Expression::ForExpression(for_expression) => self.for_expression(for_expression),

            Expression::IndexOperator { key, target } => {
                self.postfix_target(target);
                self.out.push('[');
                self.expr(key);
                self.out.push(']');
            }
            Expression::LegacyIndexOperator { key, target } => {
                self.postfix_target(target);
                self.out.push('.');
                self.number(key);
            }
            Expression::GetAttributeOperator { key, target } => {
                self.postfix_target(target);
                self.out.push('.');
                self.out.push_str(&key.value);
            }
            Expression::SplatOperator(splat) => self.splat(splat),

            Expression::UnaryOperator { operator, term } => {
                self.out.push_str(operator.symbol());
                let parens = matches!(
                    term.as_ref(),
                    Expression::BinaryOperator { .. } | Expression::ConditionalOperator { .. }
                );
                self.maybe_parenthesized(term, parens);
            }
            Expression::BinaryOperator { operator, left, right } => {
                let precedence = operator.precedence();
                self.binary_operand(left, precedence, false);
                self.out.push(' ');
                self.out.push_str(operator.symbol());
                self.out.push(' ');
                self.binary_operand(right, precedence, true);
            }
            Expression::ConditionalOperator { predicate, true_expr, false_expr } => {
                let parens = matches!(predicate.as_ref(), Expression::ConditionalOperator { .. });
                self.maybe_parenthesized(predicate, parens);
                self.out.push_str(" ? ");
                self.expr(true_expr);
                self.out.push_str(" : ");
                self.expr(false_expr);
            }
            Expression::ParenthesizedExpression { expression } => {
                self.out.push('(');
                self.expr(expression);
                self.out.push(')');
            }
        }
    }

    fn maybe_parenthesized(&mut self, expression: &Expression, parens: bool) {
        if parens {
            self.out.push('(');
        }
        self.expr(expression);
        if parens {
            self.out.push(')');
        }
    }

    /// Emit a binary operand, inserting parentheses where reparsing would
    /// otherwise regroup the tree.
    ///
    /// The parser nests same-level chains to the right, so a bare binary left
    /// child binds looser-or-equal (`<=`) and a bare binary right child binds
    /// strictly looser (`<`) than the reparse would produce. Conditionals
    /// always need parentheses under a binary operator.
    fn binary_operand(&mut self, operand: &Expression, parent_precedence: u8, is_right: bool) {
        let parens = match operand {
            Expression::BinaryOperator { operator, .. } => {
                if is_right {
                    operator.precedence() < parent_precedence
                } else {
                    operator.precedence() <= parent_precedence
                }
            }
            Expression::ConditionalOperator { .. } => true,
            _ => false,
        };
        self.maybe_parenthesized(operand, parens);
    }

    /// Emit the target of a postfix operator. Only postfix-level expressions
    /// bind tightly enough to stand bare before `[`, `.`, or a splat.
    fn postfix_target(&mut self, target: &Expression) {
        let parens = matches!(
            target,
            Expression::BinaryOperator { .. }
                | Expression::ConditionalOperator { .. }
                | Expression::UnaryOperator { .. }
        );
        self.maybe_parenthesized(target, parens);
    }

    // =========================================================================
    // COLLECTIONS & FOR-EXPRESSIONS
    // =========================================================================

    fn tuple(&mut self, elements: &[Expression]) {
        self.out.push('[');
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(element);
        }
        self.out.push(']');
    }

    fn object(&mut self, elements: &[ObjectValueElement]) {
        if elements.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{ ");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&element.key.value);
            self.out.push_str(" = ");
            self.expr(&element.value);
        }
        self.out.push_str(" }");
    }

    fn for_expression(&mut self, for_expression: &ForExpression) {
        match for_expression {
            ForExpression::Tuple { intro, expression, condition } => {
                self.out.push('[');
                self.for_intro(intro);
                self.expr(expression);
                self.for_condition(condition);
                self.out.push(']');
            }
            ForExpression::Object { intro, key, value, grouping, condition } => {
                self.out.push('{');
                self.for_intro(intro);
                self.expr(key);
                self.out.push_str(" => ");
                self.expr(value);
                if *grouping {
                    self.out.push_str("...");
                }
                self.for_condition(condition);
                self.out.push('}');
            }
        }
    }

    fn for_intro(&mut self, intro: &ForIntro) {
        self.out.push_str("for ");
        self.out.push_str(&intro.iterator.value);
        if let Some(value) = &intro.value {
            self.out.push_str(", ");
            self.out.push_str(&value.value);
        }
        self.out.push_str(" in ");
        self.expr(&intro.collection);
        self.out.push_str(" : ");
    }

    fn for_condition(&mut self, condition: &Option<Expression>) {
        if let Some(condition) = condition {
            self.out.push_str(" if ");
            self.expr(condition);
        }
    }

    // =========================================================================
    // SPLATS
    // =========================================================================

    fn splat(&mut self, splat: &SplatOperator) {
        match splat {
            SplatOperator::Attribute { attributes, target } => {
                self.postfix_target(target);
                self.out.push_str(".*");
                for attribute in attributes {
                    self.out.push('.');
                    self.out.push_str(&attribute.key.value);
                }
            }
            SplatOperator::Full { operations, target } => {
                self.postfix_target(target);
                self.out.push_str("[*]");
                for operation in operations {
                    match operation {
                        SplatOperation::GetAttribute { key } => {
                            self.out.push('.');
                            self.out.push_str(&key.value);
                        }
                        SplatOperation::Index { key } => {
                            self.out.push('[');
                            self.expr(key);
                            self.out.push(']');
                        }
                    }
                }
            }
        }
    }

    // =========================================================================
    // TEMPLATES
    // =========================================================================

    fn quoted_template(&mut self, template: &QuotedTemplateExpression) {
        self.out.push('"');
        self.template_parts(&template.parts, true);
        self.out.push('"');
    }

    fn heredoc(&mut self, heredoc: &HeredocTemplateExpression) {
        self.out.push_str("<<");
        if heredoc.strip_indent {
            self.out.push('-');
        }
        self.out.push_str(&heredoc.marker.value);
        self.out.push('\n');
        self.template_parts(&heredoc.template, false);
        self.out.push('\n');
        self.out.push_str(&heredoc.marker.value);
    }

    fn template_parts(&mut self, parts: &[TemplatePart], quoted: bool) {
        for part in parts {
            match part {
                TemplatePart::TemplateLiteral(literal) => {
                    self.template_literal(&literal.value, quoted);
                }
                TemplatePart::TemplateInterpolation(interpolation) => {
                    self.out.push_str("${");
                    if interpolation.strip.left {
                        self.out.push('~');
                    }
                    self.expr(&interpolation.expression);
                    if interpolation.strip.right {
                        self.out.push('~');
                    }
                    self.out.push('}');
                }
                TemplatePart::TemplateIf(template_if) => self.template_if(template_if, quoted),
                TemplatePart::TemplateFor(template_for) => self.template_for(template_for, quoted),
            }
        }
    }

    fn template_if(&mut self, template_if: &TemplateIf, quoted: bool) {
        self.directive_head(&template_if.strip.if_marks, |printer| {
            printer.out.push_str("if ");
            printer.expr(&template_if.condition);
        });
        self.template_parts(&template_if.then, quoted);
        if let Some(else_branch) = &template_if.else_branch {
            let marks = template_if.strip.else_marks.unwrap_or_default();
            self.directive_head(&marks, |printer| printer.out.push_str("else"));
            self.template_parts(else_branch, quoted);
        }
        self.directive_head(&template_if.strip.endif, |printer| printer.out.push_str("endif"));
    }

    fn template_for(&mut self, template_for: &TemplateFor, quoted: bool) {
        self.directive_head(&template_for.strip.for_marks, |printer| {
            printer.out.push_str("for ");
            printer.out.push_str(&template_for.intro.key.value);
            if let Some(value) = &template_for.intro.value {
                printer.out.push_str(", ");
                printer.out.push_str(&value.value);
            }
            printer.out.push_str(" in ");
            printer.expr(&template_for.intro.collection);
        });
        self.template_parts(&template_for.body, quoted);
        self.directive_head(&template_for.strip.endfor, |printer| printer.out.push_str("endfor"));
    }

    fn directive_head(&mut self, marks: &StripMarkers, body: impl FnOnce(&mut Self)) {
        self.out.push_str("%{");
        if marks.start {
            self.out.push('~');
        }
        body(self);
        if marks.end {
            self.out.push('~');
        }
        self.out.push('}');
    }

    /// Emit literal template text, re-escaping what the parser decoded.
    ///
    /// Quoted templates escape backslash sequences; heredoc bodies keep text
    /// verbatim. Both escape interpolation and directive starts.
    fn template_literal(&mut self, text: &str, quoted: bool) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '$' | '%' if chars.peek() == Some(&'{') => {
                    self.out.push(c);
                    self.out.push(c);
                }
                '\\' if quoted => self.out.push_str("\\\\"),
                '"' if quoted => self.out.push_str("\\\""),
                '\n' if quoted => self.out.push_str("\\n"),
                '\r' if quoted => self.out.push_str("\\r"),
                '\t' if quoted => self.out.push_str("\\t"),
                _ => self.out.push(c),
            }
        }
    }

    // =========================================================================
    // ATOMS
    // =========================================================================

    fn quoted_string(&mut self, text: &str) {
        self.out.push('"');
        for c in text.chars() {
            match c {
                '\\' => self.out.push_str("\\\\"),
                '"' => self.out.push_str("\\\""),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                _ => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn number(&mut self, number: &NumberLiteral) {
        assert!(
            number.value.is_finite(),
            "NumberLiteral must be finite, got {}",
            number.value
        );
        // Rust's f64 Display is shortest-round-trip, so reparsing recovers
        // the exact value.
        self.out.push_str(&number.value.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Validator
//!
//! Structural validation of AST trees.
//!
//! The type system already enforces the closed node set and the payload shape
//! of every discriminator, so validation checks the value-level invariants
//! the types cannot express: identifier lexical form, number finiteness,
//! legacy index integrality, heredoc marker form, and strip-marker coherence.
//! The walk recurses through every sub-expression and collects all issues
//! instead of failing on the first.
//!
//! ## Example
//!
//! ```rust
//! use hcl_ast::{validate, ConfigFile};
//!
//! assert!(validate(&ConfigFile::new()).is_ok());
//! ```

use crate::ast::*;
use thiserror::Error;

/// A single structural problem, located by a dotted path into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationIssue {
    /// Dotted path to the offending node, e.g. `body[0].value.elements[2]`.
    pub path: String,
    /// Description of the problem.
    pub message: String,
}

/// Check every node of a configuration file.
///
/// Returns `Ok(())` for a well-formed tree, or the full list of issues.
/// Every tree produced by the parser validates cleanly.
pub fn validate(file: &ConfigFile) -> Result<(), Vec<ValidationIssue>> {
    let mut validator = Validator::default();
    for (i, element) in file.body.iter().enumerate() {
        validator.scoped(format!("body[{i}]"), |v| v.body_element(element));
    }
    if validator.issues.is_empty() {
        Ok(())
    } else {
        Err(validator.issues)
    }
}

/// Whether `value` is lexically a valid identifier.
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    chars.all(is_identifier_continue)
}

/// Whether `c` may start an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || !c.is_ascii()
}

/// Whether `c` may continue an identifier.
pub fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || c == '-'
}

// =============================================================================
// VALIDATOR
// =============================================================================

#[derive(Default)]
struct Validator {
    path: Vec<String>,
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn scoped(&mut self, segment: String, walk: impl FnOnce(&mut Self)) {
        self.path.push(segment);
        walk(self);
        self.path.pop();
    }

    fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: self.path.join("."),
            message: message.into(),
        });
    }

    fn identifier(&mut self, segment: &str, ident: &Identifier) {
        if !is_valid_identifier(&ident.value) {
            self.scoped(segment.to_string(), |v| {
                v.issue(format!("invalid identifier {:?}", ident.value));
            });
        }
    }

    fn number(&mut self, segment: &str, number: &NumberLiteral) {
        if !number.value.is_finite() {
            self.scoped(segment.to_string(), |v| {
                v.issue(format!("number literal must be finite, got {}", number.value));
            });
        }
    }

    // =========================================================================
    // STRUCTURE
    // =========================================================================

    fn body_element(&mut self, element: &BodyElement) {
        match element {
            BodyElement::Attribute(attribute) => self.attribute(attribute),
            BodyElement::Block(block) => {
                self.identifier("blockType", &block.block_type);
                for (i, label) in block.labels.iter().enumerate() {
                    self.label(i, label);
                }
                for (i, nested) in block.bodies.iter().enumerate() {
                    self.scoped(format!("bodies[{i}]"), |v| v.body_element(nested));
                }
            }
            BodyElement::OneLineBlock(block) => {
                self.identifier("blockType", &block.block_type);
                for (i, label) in block.labels.iter().enumerate() {
                    self.label(i, label);
                }
                if let Some(attribute) = &block.attribute {
                    self.scoped("attribute".to_string(), |v| v.attribute(attribute));
                }
            }
        }
    }

    fn attribute(&mut self, attribute: &Attribute) {
        self.identifier("name", &attribute.name);
        self.scoped("value".to_string(), |v| v.expr(&attribute.value));
    }

    fn label(&mut self, index: usize, label: &Label) {
        if let Label::Identifier(ident) = label {
            self.identifier(&format!("labels[{index}]"), ident);
        }
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    fn expr(&mut self, expression: &Expression) {
        match expression {
            Expression::StringLiteral(_)
            | Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_) => {}
            Expression::NumberLiteral(number) => self.number("value", number),

            Expression::TupleValue { elements } => {
                for (i, element) in elements.iter().enumerate() {
                    self.scoped(format!("elements[{i}]"), |v| v.expr(element));
                }
            }
            Expression::ObjectValue { elements } => {
                for (i, element) in elements.iter().enumerate() {
                    self.scoped(format!("elements[{i}]"), |v| {
                        v.identifier("key", &element.key);
                        v.scoped("value".to_string(), |v| v.expr(&element.value));
                    });
                }
            }

            Expression::QuotedTemplateExpression(template) => {
                self.template_parts(&template.parts);
            }
            Expression::HeredocTemplateExpression(heredoc) => {
                if !is_valid_identifier(&heredoc.marker.value) {
                    self.issue(format!("invalid heredoc marker {:?}", heredoc.marker.value));
                }
                self.scoped("template".to_string(), |v| v.template_parts(&heredoc.template));
            }

            Expression::FunctionCallExpression { name, args } => {
                self.identifier("name", name);
                for (i, arg) in args.iter().enumerate() {
                    self.scoped(format!("args[{i}]"), |v| v.expr(arg));
                }
            }
            Expression::VariableExpression { name } => self.identifier("name", name),

            Expression::ForExpression(for_expression) => self.for_expression(for_expression),

            Expression::IndexOperator { key, target } => {
                self.scoped("key".to_string(), |v| v.expr(key));
                self.scoped("target".to_string(), |v| v.expr(target));
            }
            Expression::LegacyIndexOperator { key, target } => {
                self.number("key", key);
                if key.value.is_finite() && (key.value.fract() != 0.0 || key.value < 0.0) {
                    self.issue(format!(
                        "legacy index must be a non-negative integer, got {}",
                        key.value
                    ));
                }
                self.scoped("target".to_string(), |v| v.expr(target));
            }
            Expression::GetAttributeOperator { key, target } => {
                self.identifier("key", key);
                self.scoped("target".to_string(), |v| v.expr(target));
            }
            Expression::SplatOperator(splat) => self.splat(splat),

            Expression::UnaryOperator { term, .. } => {
                self.scoped("term".to_string(), |v| v.expr(term));
            }
            Expression::BinaryOperator { left, right, .. } => {
                self.scoped("left".to_string(), |v| v.expr(left));
                self.scoped("right".to_string(), |v| v.expr(right));
            }
            Expression::ConditionalOperator { predicate, true_expr, false_expr } => {
                self.scoped("predicate".to_string(), |v| v.expr(predicate));
                self.scoped("trueExpr".to_string(), |v| v.expr(true_expr));
                self.scoped("falseExpr".to_string(), |v| v.expr(false_expr));
            }
            Expression::ParenthesizedExpression { expression } => {
                self.scoped("expression".to_string(), |v| v.expr(expression));
            }
        }
    }

    fn for_expression(&mut self, for_expression: &ForExpression) {
        match for_expression {
            ForExpression::Tuple { intro, expression, condition } => {
                self.for_intro(intro);
                self.scoped("expression".to_string(), |v| v.expr(expression));
                if let Some(condition) = condition {
                    self.scoped("condition".to_string(), |v| v.expr(condition));
                }
            }
            ForExpression::Object { intro, key, value, condition, .. } => {
                self.for_intro(intro);
                self.scoped("key".to_string(), |v| v.expr(key));
                self.scoped("value".to_string(), |v| v.expr(value));
                if let Some(condition) = condition {
                    self.scoped("condition".to_string(), |v| v.expr(condition));
                }
            }
        }
    }

    fn for_intro(&mut self, intro: &ForIntro) {
        self.identifier("intro.iterator", &intro.iterator);
        if let Some(value) = &intro.value {
            self.identifier("intro.value", value);
        }
        self.scoped("intro.collection".to_string(), |v| v.expr(&intro.collection));
    }

    fn splat(&mut self, splat: &SplatOperator) {
        match splat {
            SplatOperator::Attribute { attributes, target } => {
                for (i, attribute) in attributes.iter().enumerate() {
                    self.identifier(&format!("attributes[{i}]"), &attribute.key);
                }
                self.scoped("target".to_string(), |v| v.expr(target));
            }
            SplatOperator::Full { operations, target } => {
                for (i, operation) in operations.iter().enumerate() {
                    match operation {
                        SplatOperation::GetAttribute { key } => {
                            self.identifier(&format!("operations[{i}]"), key);
                        }
                        SplatOperation::Index { key } => {
                            self.scoped(format!("operations[{i}]"), |v| v.expr(key));
                        }
                    }
                }
                self.scoped("target".to_string(), |v| v.expr(target));
            }
        }
    }

    // =========================================================================
    // TEMPLATES
    // =========================================================================

    fn template_parts(&mut self, parts: &[TemplatePart]) {
        for (i, part) in parts.iter().enumerate() {
            self.scoped(format!("parts[{i}]"), |v| match part {
                TemplatePart::TemplateLiteral(_) => {}
                TemplatePart::TemplateInterpolation(interpolation) => {
                    v.scoped("expression".to_string(), |v| v.expr(&interpolation.expression));
                }
                TemplatePart::TemplateIf(template_if) => {
                    v.scoped("condition".to_string(), |v| v.expr(&template_if.condition));
                    v.scoped("then".to_string(), |v| v.template_parts(&template_if.then));
                    if let Some(else_branch) = &template_if.else_branch {
                        v.scoped("else".to_string(), |v| v.template_parts(else_branch));
                    }
                    if template_if.else_branch.is_some() != template_if.strip.else_marks.is_some() {
                        v.issue("else strip markers must be present exactly when the else branch is");
                    }
                }
                TemplatePart::TemplateFor(template_for) => {
                    v.identifier("intro.key", &template_for.intro.key);
                    if let Some(value) = &template_for.intro.value {
                        v.identifier("intro.value", value);
                    }
                    v.scoped("intro.collection".to_string(), |v| {
                        v.expr(&template_for.intro.collection)
                    });
                    v.scoped("body".to_string(), |v| v.template_parts(&template_for.body));
                }
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

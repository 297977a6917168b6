//! Stringifier behavior over hand-built trees, including the normalizations
//! that only hand-built (never parser-produced) trees exercise.

use hcl_ast::*;

fn attr(name: &str, value: Expression) -> BodyElement {
    BodyElement::Attribute(Attribute { name: Identifier::new(name), value })
}

fn file(body: Vec<BodyElement>) -> ConfigFile {
    ConfigFile::with_body(body)
}

fn binary(operator: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::BinaryOperator {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[test]
fn one_line_block_without_attribute_normalizes_to_empty_braces() {
    let out = stringify(&file(vec![BodyElement::OneLineBlock(OneLineBlock {
        block_type: Identifier::new("meta"),
        labels: vec![],
        attribute: None,
    })]));
    assert_eq!(out, "meta {}\n");
}

#[test]
fn object_elements_inline_with_comma_separators() {
    let out = stringify(&file(vec![attr(
        "tags",
        Expression::ObjectValue {
            elements: vec![
                ObjectValueElement {
                    key: Identifier::new("env"),
                    value: Expression::QuotedTemplateExpression(QuotedTemplateExpression {
                        parts: vec![TemplatePart::TemplateLiteral(TemplateLiteral::new("prod"))],
                    }),
                },
                ObjectValueElement {
                    key: Identifier::new("count"),
                    value: Expression::number(2.0),
                },
            ],
        },
    )]));
    assert_eq!(out, "tags = { env = \"prod\", count = 2 }\n");
}

#[test]
fn conditional_under_binary_operand_is_parenthesized() {
    let conditional = Expression::ConditionalOperator {
        predicate: Box::new(Expression::variable("p")),
        true_expr: Box::new(Expression::number(1.0)),
        false_expr: Box::new(Expression::number(2.0)),
    };
    let out = stringify(&file(vec![attr(
        "x",
        binary(BinaryOp::Add, Expression::variable("a"), conditional),
    )]));
    assert_eq!(out, "x = a + (p ? 1 : 2)\n");
}

#[test]
fn unary_term_binary_is_parenthesized() {
    let out = stringify(&file(vec![attr(
        "x",
        Expression::UnaryOperator {
            operator: UnaryOp::Neg,
            term: Box::new(binary(
                BinaryOp::Add,
                Expression::variable("a"),
                Expression::variable("b"),
            )),
        },
    )]));
    assert_eq!(out, "x = -(a + b)\n");
}

#[test]
fn postfix_target_binary_is_parenthesized() {
    let out = stringify(&file(vec![attr(
        "x",
        Expression::IndexOperator {
            key: Box::new(Expression::number(0.0)),
            target: Box::new(binary(
                BinaryOp::Add,
                Expression::variable("a"),
                Expression::variable("b"),
            )),
        },
    )]));
    assert_eq!(out, "x = (a + b)[0]\n");
}

#[test]
fn legacy_index_is_preserved_not_normalized() {
    let out = stringify(&file(vec![attr(
        "x",
        Expression::LegacyIndexOperator {
            key: NumberLiteral { value: 0.0 },
            target: Box::new(Expression::variable("xs")),
        },
    )]));
    assert_eq!(out, "x = xs.0\n");
}

#[test]
fn splat_forms_render_compactly() {
    let attribute_splat = Expression::SplatOperator(Box::new(SplatOperator::Attribute {
        attributes: vec![SplatGetAttribute { key: Identifier::new("id") }],
        target: Expression::variable("instances"),
    }));
    let full_splat = Expression::SplatOperator(Box::new(SplatOperator::Full {
        operations: vec![
            SplatOperation::GetAttribute { key: Identifier::new("tags") },
            SplatOperation::Index { key: Expression::number(0.0) },
        ],
        target: Expression::variable("instances"),
    }));
    let out = stringify(&file(vec![attr("a", attribute_splat), attr("b", full_splat)]));
    assert_eq!(out, "a = instances.*.id\nb = instances[*].tags[0]\n");
}

#[test]
fn heredoc_renders_marker_and_body_verbatim() {
    let out = stringify(&file(vec![attr(
        "doc",
        Expression::HeredocTemplateExpression(HeredocTemplateExpression {
            marker: Identifier::new("EOT"),
            strip_indent: true,
            template: vec![TemplatePart::TemplateLiteral(TemplateLiteral::new(
                "  line one\n  line two",
            ))],
        }),
    )]));
    assert_eq!(out, "doc = <<-EOT\n  line one\n  line two\nEOT\n");
}

#[test]
fn string_label_is_quoted_and_escaped() {
    let out = stringify(&file(vec![BodyElement::Block(Block {
        block_type: Identifier::new("module"),
        labels: vec![Label::StringLiteral(StringLiteral::new("name \"with\" quotes"))],
        bodies: vec![],
    })]));
    assert_eq!(out, "module \"name \\\"with\\\" quotes\" {}\n");
}

#[test]
fn template_if_directive_renders_with_strip_markers() {
    let out = stringify(&file(vec![attr(
        "msg",
        Expression::QuotedTemplateExpression(QuotedTemplateExpression {
            parts: vec![TemplatePart::TemplateIf(TemplateIf {
                condition: Expression::variable("ok"),
                then: vec![TemplatePart::TemplateLiteral(TemplateLiteral::new("yes"))],
                else_branch: Some(vec![TemplatePart::TemplateLiteral(TemplateLiteral::new(
                    "no",
                ))]),
                strip: TemplateIfStrip {
                    if_marks: StripMarkers { start: true, end: false },
                    else_marks: Some(StripMarkers::default()),
                    endif: StripMarkers { start: false, end: true },
                },
            })],
        }),
    )]));
    assert_eq!(out, "msg = \"%{~if ok}yes%{else}no%{endif~}\"\n");
}

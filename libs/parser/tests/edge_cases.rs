//! Boundary behaviors: degenerate inputs, malformed constructs, lexical
//! limits, and line-ending tolerance.

use hcl_ast::{BodyElement, Expression};
use hcl_parser::parse;

#[test]
fn empty_input_is_an_empty_config_file() {
    assert!(parse("").unwrap().body.is_empty());
}

#[test]
fn comment_only_input_is_an_empty_config_file() {
    let input = "// one\n# two\n/* three\nstill three */\n\n";
    assert!(parse(input).unwrap().body.is_empty());
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(parse("a = \"abc\n").is_err());
    assert!(parse("a = \"abc").is_err());
}

#[test]
fn unterminated_heredoc_is_an_error() {
    assert!(parse("a = <<EOF\nbody without end\n").is_err());
}

#[test]
fn unbalanced_braces_are_an_error() {
    assert!(parse("b {\n  a = 1\n").is_err());
    assert!(parse("a = [1, 2\n").is_err());
    assert!(parse("a = (1\n").is_err());
}

#[test]
fn invalid_escape_is_an_error() {
    assert!(parse("a = \"\\q\"\n").is_err());
    assert!(parse("a = \"\\u12\"\n").is_err());
}

#[test]
fn number_with_fraction_and_signed_exponent() {
    let file = parse("a = 1.5e-3\n").unwrap();
    match &file.body[0] {
        BodyElement::Attribute(attribute) => {
            assert_eq!(attribute.value, Expression::number(1.5e-3));
        }
        other => panic!("expected attribute, got {other:?}"),
    }
}

#[test]
fn identifier_may_not_start_with_a_digit() {
    assert!(parse("9lives = 1\n").is_err());
}

#[test]
fn identifier_may_contain_hyphens_after_the_first_character() {
    let file = parse("load-balancer = up-stream\n").unwrap();
    match &file.body[0] {
        BodyElement::Attribute(attribute) => {
            assert_eq!(attribute.name.value, "load-balancer");
            match &attribute.value {
                Expression::VariableExpression { name } => assert_eq!(name.value, "up-stream"),
                other => panic!("expected variable, got {other:?}"),
            }
        }
        other => panic!("expected attribute, got {other:?}"),
    }
}

#[test]
fn crlf_line_endings_parse_like_lf() {
    let file = parse("a = 1\r\nb {\r\n  c = 2\r\n}\r\n").unwrap();
    assert_eq!(file.body.len(), 2);
}

#[test]
fn error_location_points_at_the_failure() {
    let error = parse("ok = 1\nbad = ]\n").unwrap_err();
    assert_eq!(error.line, 2);
    assert_eq!(error.column, 7);
    assert!(error.expected.contains(&"expression".to_string()));
}

#[test]
fn error_reports_expected_terminator() {
    let error = parse("a = 1 2\n").unwrap_err();
    assert!(error.expected.iter().any(|e| e.contains("newline")));
}

#[test]
fn block_comment_acts_as_inline_whitespace() {
    let file = parse("a /* note */ = /* other */ 1\n").unwrap();
    assert_eq!(file.body.len(), 1);
}

#[test]
fn deep_nesting_is_rejected_not_a_crash() {
    let deep = format!("a = {}1{}\n", "[".repeat(2000), "]".repeat(2000));
    let error = parse(&deep).unwrap_err();
    assert!(error.message.contains("nesting"));
}

#[test]
fn attribute_value_must_not_span_lines_outside_brackets() {
    assert!(parse("a = 1 +\n2\n").is_err());
}

#[test]
fn bracketed_value_may_span_lines() {
    let file = parse("a = [\n  1 +\n  2,\n]\n").unwrap();
    assert_eq!(file.body.len(), 1);
}

#[test]
fn heredoc_end_marker_tolerates_leading_whitespace() {
    let file = parse("a = <<EOF\nbody\n   EOF\n").unwrap();
    assert_eq!(file.body.len(), 1);
}

#[test]
fn stray_closing_brace_is_an_error() {
    assert!(parse("}\n").is_err());
}

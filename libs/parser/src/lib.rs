//! # HCL Parser (Pure Rust)
//!
//! A recursive descent parser for HCL native syntax.
//! No parser generator - the ordered-choice grammar is hand-written over a
//! character cursor.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Cursor → Parser → ConfigFile (hcl-ast)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hcl_parser::parse;
//!
//! let file = parse("attr = \"value\"\n").unwrap();
//! assert_eq!(file.body.len(), 1);
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the front of the pipeline; `hcl-ast` owns the tree shape,
//! the validator, and the stringifier:
//!
//! ```text
//! hcl-parser → hcl-ast (validate, stringify)
//! ```

pub mod cursor;
pub mod error;
pub mod parser;

// Re-export public API
pub use cursor::{Cursor, Position};
pub use error::ParseError;
pub use hcl_ast as ast;
pub use parser::Parser;

use hcl_ast::{ConfigFile, Expression, TemplatePart};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse HCL source into a [`ConfigFile`].
///
/// This is the main entry point. The returned `Result` is the tagged
/// success-or-error form: a complete AST, or a single [`ParseError`]
/// pinpointing the first blocked alternative.
///
/// ## Example
///
/// ```rust
/// use hcl_parser::parse;
///
/// let file = parse("resource \"aws_instance\" \"web\" {}\n").unwrap();
/// assert_eq!(file.body.len(), 1);
///
/// let error = parse("resource {").unwrap_err();
/// assert!(error.line >= 1);
/// ```
pub fn parse(input: &str) -> Result<ConfigFile, ParseError> {
    Parser::new(input).parse()
}

/// Parse an input that consists of a single expression.
///
/// ## Example
///
/// ```rust
/// use hcl_parser::parse_expression;
///
/// let expression = parse_expression("1 + 2 * 3").unwrap();
/// ```
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    Parser::new(input).parse_expression()
}

/// Parse an input that consists of a bare template body, as in a template
/// file.
///
/// ## Example
///
/// ```rust
/// use hcl_parser::parse_template;
///
/// let parts = parse_template("Hello, ${name}!").unwrap();
/// assert_eq!(parts.len(), 3);
/// ```
pub fn parse_template(input: &str) -> Result<Vec<TemplatePart>, ParseError> {
    Parser::new(input).parse_template()
}

// =============================================================================
// TESTS
// =============================================================================

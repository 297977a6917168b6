//! # HCL AST
//!
//! AST schema, validator, and stringifier for HCL native syntax.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → hcl-parser → ConfigFile → stringify → Source Text
//! ```
//!
//! This crate owns the middle of the pipeline: the closed set of node shapes
//! ([`ast`]), a structural validator ([`validate`]), and a printer emitting
//! normalized HCL text ([`stringify`]). Parsing lives in the `hcl-parser`
//! crate.
//!
//! ## Example
//!
//! ```rust
//! use hcl_ast::{stringify, Attribute, BodyElement, ConfigFile, Expression, Identifier};
//!
//! let file = ConfigFile::with_body(vec![BodyElement::Attribute(Attribute {
//!     name: Identifier::new("count"),
//!     value: Expression::number(3.0),
//! })]);
//! assert_eq!(stringify(&file), "count = 3\n");
//! ```

pub mod ast;
pub mod printer;
pub mod validate;

// Re-export public API
pub use ast::*;
pub use printer::stringify;
pub use validate::{validate, ValidationIssue};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_then_validate() {
        let file = ConfigFile::with_body(vec![BodyElement::Attribute(Attribute {
            name: Identifier::new("enabled"),
            value: Expression::BooleanLiteral(BooleanLiteral { value: false }),
        })]);
        assert!(validate(&file).is_ok());
        assert_eq!(stringify(&file), "enabled = false\n");
    }
}

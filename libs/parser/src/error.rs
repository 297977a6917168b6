//! # Parse Errors
//!
//! The single error kind produced by the parser. A parse either succeeds
//! completely or fails with one [`ParseError`] pinpointing the first blocked
//! alternative: the offending offset and the set of productions that were
//! expected there.

use crate::cursor::Position;
use thiserror::Error;

/// A parse error with location information.
///
/// `line` and `column` are 1-based. `expected` lists the alternatives the
/// parser would have accepted at the failure position.
///
/// ## Example
///
/// ```rust
/// let error = hcl_parser::parse("a = ").unwrap_err();
/// assert_eq!(error.line, 1);
/// assert!(!error.expected.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Byte offset of the failure.
    pub offset: usize,
    /// Line of the failure (1-based).
    pub line: usize,
    /// Column of the failure (1-based, in characters).
    pub column: usize,
    /// Descriptions of the alternatives expected at the failure position.
    pub expected: Vec<String>,
}

impl ParseError {
    /// Build an error from what was found and what was expected.
    pub fn expected(position: Position, found: &str, expected: Vec<String>) -> Self {
        let message = format!(
            "unexpected {} at line {}, column {}, expected {}",
            found,
            position.line + 1,
            position.column + 1,
            expected.join(" or "),
        );
        Self {
            message,
            offset: position.byte,
            line: position.line + 1,
            column: position.column + 1,
            expected,
        }
    }

    /// Build an error with a custom message, e.g. a nesting-limit failure.
    pub fn message_at(position: Position, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: format!(
                "{} at line {}, column {}",
                message,
                position.line + 1,
                position.column + 1
            ),
            offset: position.byte,
            line: position.line + 1,
            column: position.column + 1,
            expected: Vec::new(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

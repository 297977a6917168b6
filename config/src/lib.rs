//! Shared configuration crate holding constants used across the workspace.
//!
//! The `constants` module exposes strongly typed settings so downstream crates
//! avoid sprinkling magic numbers. Example:
//!
//! ```
//! use config::constants::{INDENT_UNIT, MAX_NESTING_DEPTH};
//!
//! assert_eq!(INDENT_UNIT.len(), 2);
//! assert!(MAX_NESTING_DEPTH >= 64);
//! ```

pub mod constants;

pub use constants::{INDENT_UNIT, MAX_NESTING_DEPTH};

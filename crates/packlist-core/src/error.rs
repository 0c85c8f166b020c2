//! # Error Types
//!
//! Construction-time errors for the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Document-level validation errors live in `packlist-model`; this crate
//! only reports failures to build an identifier or a date in the first
//! place.

use thiserror::Error;

/// Errors raised by the foundational types in this crate.
#[derive(Error, Debug)]
pub enum PackListError {
    /// An identifier failed its construction rules.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A calendar date string could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

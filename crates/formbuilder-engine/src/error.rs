//! Session error types

use thiserror::Error;

/// Errors raised by a form fill session.
///
/// The evaluator and the calculator never fail; only attempts to write
/// into the session can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No field with this id in the form
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Derived fields are computed, not entered
    #[error("Field '{0}' is derived and cannot be set directly")]
    DerivedFieldReadOnly(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

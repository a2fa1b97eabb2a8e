//! Error types for the form builder core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Duplicate rule '{kind}' on field '{field}'")]
    DuplicateRule { field: String, kind: String },

    #[error("Duplicate option '{value}'")]
    DuplicateOption { value: String },

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

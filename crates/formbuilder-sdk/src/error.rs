//! SDK error types

use formbuilder_core::{CoreError, FieldType, RuleKind};
use formbuilder_engine::SessionError;
use formbuilder_repository::RepositoryError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Storage error
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    /// Field or schema failed a structural check
    #[error("Invalid form: {0}")]
    CoreError(#[from] CoreError),

    /// Preview session error
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),

    /// Saving needs a name and at least one field
    #[error("Form needs a name and at least one field")]
    IncompleteForm,

    /// No saved form with this id
    #[error("Form not found: {0}")]
    FormNotFound(String),

    /// Field editor input rejected
    #[error("Invalid field draft: {0}")]
    InvalidDraft(String),

    /// Rule kind already on the field
    #[error("Rule '{0}' is already added")]
    DuplicateRule(RuleKind),

    /// Option value already on the field
    #[error("Option value '{0}' already exists")]
    DuplicateOption(String),

    /// Rule kind not offered for the field type
    #[error("Rule '{kind}' is not available for {field_type} fields")]
    RuleNotAvailable { kind: RuleKind, field_type: FieldType },
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

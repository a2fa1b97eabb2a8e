//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formbuilder_engine::SessionError;
use formbuilder_repository::RepositoryError;
use formbuilder_sdk::SdkError;
use serde_json::json;
use thiserror::Error;

/// Server error type
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::InternalError(msg)
            | ServerError::NotFound(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::FormNotFound(_) => ServerError::NotFound(err.to_string()),
            SdkError::RepositoryError(RepositoryError::NotFound { .. }) => {
                ServerError::NotFound(err.to_string())
            }
            SdkError::RepositoryError(_) | SdkError::ConfigError(_) => {
                ServerError::InternalError(err.to_string())
            }
            SdkError::IncompleteForm
            | SdkError::CoreError(_)
            | SdkError::SessionError(_)
            | SdkError::InvalidDraft(_)
            | SdkError::DuplicateRule(_)
            | SdkError::DuplicateOption(_)
            | SdkError::RuleNotAvailable { .. } => ServerError::InvalidRequest(err.to_string()),
        }
    }
}

impl From<SessionError> for ServerError {
    fn from(err: SessionError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

//! Unit tests for ServerError responses

use axum::{http::StatusCode, response::IntoResponse};
use formbuilder_core::{CoreError, RuleKind};
use formbuilder_sdk::SdkError;
use formbuilder_server::error::ServerError;
use http_body_util::BodyExt;
use serde_json::Value;

async fn body_json(err: ServerError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_error_body_shape() {
    let (status, json) = body_json(ServerError::NotFound("Form not found: 1".to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Form not found: 1");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_editor_errors_are_bad_requests() {
    let errors = vec![
        SdkError::IncompleteForm,
        SdkError::DuplicateRule(RuleKind::Required),
        SdkError::DuplicateOption("a".to_string()),
        SdkError::InvalidDraft("label".to_string()),
        SdkError::CoreError(CoreError::FieldNotFound("x".to_string())),
    ];

    for err in errors {
        let (status, json) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
    }
}

#[tokio::test]
async fn test_config_error_is_internal() {
    let (status, json) =
        body_json(SdkError::ConfigError("no storage".to_string()).into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("no storage"));
}

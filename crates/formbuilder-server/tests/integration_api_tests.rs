//! Integration tests for REST API endpoints
//!
//! These tests build a real FormWorkspace and drive the router end-to-end.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use formbuilder_repository::{MemoryRepository, RepositoryConfig};
use formbuilder_sdk::WorkspaceBuilder;
use formbuilder_server::api::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn create_test_app() -> Router {
    let workspace = WorkspaceBuilder::new()
        .with_repository(RepositoryConfig::memory())
        .build()
        .await
        .expect("Failed to build workspace");
    create_router(workspace)
}

fn signup_form() -> Value {
    json!({
        "name": "Signup",
        "fields": [
            {
                "id": "email",
                "type": "text",
                "label": "Email",
                "required": true,
                "validationRules": [
                    {"type": "required", "message": "Email is required"},
                    {"type": "email", "message": "Enter a valid email"}
                ]
            },
            {
                "id": "dob",
                "type": "date",
                "label": "Date of birth",
                "validationRules": []
            },
            {
                "id": "age",
                "type": "number",
                "label": "Age",
                "validationRules": [],
                "isDerived": true,
                "derivedConfig": {
                    "parentFields": ["dob"],
                    "formula": "",
                    "calculationType": "age_from_birth"
                }
            }
        ]
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_form_lifecycle() {
    let app = create_test_app().await;

    let (status, json) = send(&app, "GET", "/v1/forms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));

    let (status, created) = send(&app, "POST", "/v1/forms", Some(signup_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Signup");
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/v1/forms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, "GET", &format!("/v1/forms/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, "DELETE", &format!("/v1/forms/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, "GET", &format!("/v1/forms/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);

    let (status, _) = send(&app, "DELETE", &format!("/v1/forms/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_form_leaves_storage_untouched() {
    let repo = Arc::new(MemoryRepository::new());
    let workspace = WorkspaceBuilder::new()
        .with_repository_instance(repo.clone())
        .build()
        .await
        .unwrap();
    let app = create_router(workspace);

    let (status, json) = send(&app, "DELETE", "/v1/forms/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(repo.payload().await.is_none());
}

#[tokio::test]
async fn test_create_incomplete_form() {
    let app = create_test_app().await;

    let (status, json) = send(
        &app,
        "POST",
        "/v1/forms",
        Some(json!({"name": "", "fields": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_form_with_broken_field() {
    let app = create_test_app().await;

    // Select fields need options
    let body = json!({
        "name": "Broken",
        "fields": [{"id": "plan", "type": "select", "label": "Plan", "validationRules": []}]
    });
    let (status, _) = send(&app, "POST", "/v1/forms", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evaluate_form() {
    let app = create_test_app().await;
    let (_, created) = send(&app, "POST", "/v1/forms", Some(signup_form())).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/v1/forms/{}/evaluate", id);

    let (status, json) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "values": {"email": "not-an-email", "dob": "2000-06-16"},
            "referenceDate": "2024-06-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isValid"], false);
    assert_eq!(json["values"]["age"], 23.0);
    assert_eq!(json["errors"][0]["fieldId"], "email");
    assert_eq!(json["errors"][0]["messages"], json!(["Enter a valid email"]));

    let (status, json) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"values": {"email": "ada@example.com"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isValid"], true);
}

#[tokio::test]
async fn test_evaluate_rejects_derived_input() {
    let app = create_test_app().await;
    let (_, created) = send(&app, "POST", "/v1/forms", Some(signup_form())).await;
    let uri = format!("/v1/forms/{}/evaluate", created["id"].as_str().unwrap());

    let (status, json) = send(&app, "POST", &uri, Some(json!({"values": {"age": 40}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("age"));

    let (status, _) = send(&app, "POST", "/v1/forms/missing/evaluate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validate_endpoint() {
    let app = create_test_app().await;

    let rules = json!([
        {"type": "required", "message": "Required"},
        {"type": "minLength", "value": 8, "message": "Too short"},
        {"type": "password", "message": "Weak password"}
    ]);

    let (status, json) = send(
        &app,
        "POST",
        "/v1/validate",
        Some(json!({"value": "abc", "rules": rules})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["errors"], json!(["Too short", "Weak password"]));

    let (_, json) = send(
        &app,
        "POST",
        "/v1/validate",
        Some(json!({"value": null, "rules": rules})),
    )
    .await;
    assert_eq!(json["errors"], json!(["Required"]));

    let (_, json) = send(
        &app,
        "POST",
        "/v1/validate",
        Some(json!({"value": "secret123", "rules": rules})),
    )
    .await;
    assert_eq!(json["errors"], json!([]));
}

#[tokio::test]
async fn test_derive_endpoint() {
    let app = create_test_app().await;

    let (status, json) = send(
        &app,
        "POST",
        "/v1/derive",
        Some(json!({
            "calculationType": "sum",
            "parentFields": ["a", "b", "c"],
            "values": {"a": "2", "b": 3.5, "c": "x"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], 5.5);

    let (_, json) = send(
        &app,
        "POST",
        "/v1/derive",
        Some(json!({
            "calculationType": "concat",
            "parentFields": ["first", "middle", "last"],
            "values": {"first": "Ada", "last": "Lovelace"}
        })),
    )
    .await;
    assert_eq!(json["value"], "Ada  Lovelace");

    let (_, json) = send(
        &app,
        "POST",
        "/v1/derive",
        Some(json!({
            "calculationType": "age_from_birth",
            "parentFields": ["dob"],
            "values": {"dob": "1990-01-01"},
            "referenceDate": "2024-01-01"
        })),
    )
    .await;
    assert_eq!(json["value"], 34.0);
}

#[tokio::test]
async fn test_malformed_json() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/validate")
                .header("content-type", "application/json")
                .body(Body::from("{invalid json}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("Malformed JSON"));
}

#[tokio::test]
async fn test_not_found_endpoint() {
    let app = create_test_app().await;
    let (status, _) = send(&app, "GET", "/v1/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forms_persist_across_restarts() {
    let temp = TempDir::new().unwrap();
    let config = RepositoryConfig::file_system(temp.path().to_string_lossy().to_string());

    let workspace = WorkspaceBuilder::new()
        .with_repository(config.clone())
        .build()
        .await
        .unwrap();
    let app = create_router(workspace);
    let (status, _) = send(&app, "POST", "/v1/forms", Some(signup_form())).await;
    assert_eq!(status, StatusCode::CREATED);

    let workspace = WorkspaceBuilder::new()
        .with_repository(config)
        .build()
        .await
        .unwrap();
    let app = create_router(workspace);
    let (_, listed) = send(&app, "GET", "/v1/forms", None).await;
    assert_eq!(listed[0]["name"], "Signup");
}

//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use formbuilder_core::FormSchema;
use formbuilder_engine::{DerivedValueCalculator, FormSession, FormSubmission, RuleEvaluator};
use tracing::info;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List saved forms
pub(super) async fn list_forms(State(state): State<AppState>) -> Json<Vec<FormSchema>> {
    let workspace = state.workspace.read().await;
    Json(workspace.saved_forms().to_vec())
}

/// Save a new form
pub(super) async fn create_form(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CreateFormRequest>,
) -> Result<(StatusCode, Json<FormSchema>), ServerError> {
    info!(
        "Received form {:?} with {} fields",
        payload.name,
        payload.fields.len()
    );

    let mut workspace = state.workspace.write().await;
    let schema = workspace.save_form(payload.name, payload.fields).await?;

    Ok((StatusCode::CREATED, Json(schema)))
}

/// Get one saved form
pub(super) async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormSchema>, ServerError> {
    let workspace = state.workspace.read().await;
    Ok(Json(workspace.saved_form(&id)?.clone()))
}

/// Delete a saved form
pub(super) async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut workspace = state.workspace.write().await;
    // Unknown ids never reach storage
    workspace.saved_form(&id)?;

    workspace.delete_saved_form(&id).await?;
    info!(form_id = %id, "deleted form");
    Ok(StatusCode::NO_CONTENT)
}

/// Fill a saved form with values, recompute derived fields and validate
pub(super) async fn evaluate_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonExtractor(payload): JsonExtractor<EvaluateRequest>,
) -> Result<Json<FormSubmission>, ServerError> {
    let mut session = {
        let workspace = state.workspace.read().await;
        match payload.reference_date {
            Some(today) => {
                let schema = workspace.saved_form(&id)?;
                FormSession::with_reference_date(schema.fields.clone(), today)
            }
            None => workspace.start_session(&id)?,
        }
    };

    session.set_values(payload.values)?;
    let submission = session.submit();

    info!(
        form_id = %id,
        is_valid = submission.is_valid,
        failing_fields = submission.errors.len(),
        "evaluated form"
    );

    Ok(Json(submission))
}

/// Run a rule list against one value
pub(super) async fn validate(
    JsonExtractor(payload): JsonExtractor<ValidateRequest>,
) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        errors: RuleEvaluator::evaluate(payload.value.as_ref(), &payload.rules),
    })
}

/// Compute one derived value
pub(super) async fn derive(
    JsonExtractor(payload): JsonExtractor<DeriveRequest>,
) -> Json<DeriveResponse> {
    let today = payload
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());

    Json(DeriveResponse {
        value: DerivedValueCalculator::compute_on(
            payload.calculation_type,
            &payload.parent_fields,
            &payload.values,
            today,
        ),
    })
}

//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use chrono::NaiveDate;
use formbuilder_core::{CalculationKind, FormField, FormValues, ValidationRule, Value};
use formbuilder_sdk::FormWorkspace;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<RwLock<FormWorkspace>>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create a saved form
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub name: String,
    pub fields: Vec<FormField>,
}

/// Fill a saved form
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Entered values keyed by field id; derived fields are computed
    #[serde(default)]
    pub values: FormValues,

    /// Fixed date for age calculations
    #[serde(default, rename = "referenceDate")]
    pub reference_date: Option<NaiveDate>,
}

/// Check one value against a rule list
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub value: Option<Value>,
    pub rules: Vec<ValidationRule>,
}

/// Rule failures in rule order
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub errors: Vec<String>,
}

/// Compute one derived value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveRequest {
    pub calculation_type: CalculationKind,
    pub parent_fields: Vec<String>,
    #[serde(default)]
    pub values: FormValues,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Computed derived value
#[derive(Debug, Serialize, Deserialize)]
pub struct DeriveResponse {
    pub value: Value,
}

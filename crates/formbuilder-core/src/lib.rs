//! Form builder core - data model shared by every form builder crate
//!
//! This crate provides the fundamental types:
//! - Field values and the live `FormValues` map
//! - Validation rules
//! - Field, derived-field and schema definitions
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{
    CalculationKind, DerivedFieldConfig, FieldType, FormDraft, FormField, FormSchema, FormValues,
    RuleBound, RuleKind, SelectOption, ValidationRule, Value,
};

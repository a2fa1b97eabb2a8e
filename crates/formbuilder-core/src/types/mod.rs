//! Type system for the form builder
//!
//! This module contains the schema data model:
//! - Field values
//! - Validation rules
//! - Field and derived-field definitions
//! - Form schemas

pub mod field;
pub mod rule;
pub mod schema;
pub mod value;

pub use field::{CalculationKind, DerivedFieldConfig, FieldType, FormField, SelectOption};
pub use rule::{RuleBound, RuleKind, ValidationRule};
pub use schema::{FormDraft, FormSchema};
pub use value::{FormValues, Value};

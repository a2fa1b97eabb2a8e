//! Form builder engine - validation and derived values
//!
//! This crate evaluates a form at fill time:
//! - [`RuleEvaluator`] applies a field's validation rules to its value
//! - [`DerivedValueCalculator`] computes derived fields from their parents
//! - [`FormSession`] keeps the live values of one fill and recomputes
//!   derived fields after every write
//!
//! The evaluator and the calculator are pure functions over plain data and
//! never fail.

pub mod derived;
pub mod error;
pub mod helpers;
pub mod session;
pub mod validation;

// Re-export main types
pub use derived::DerivedValueCalculator;
pub use error::{Result, SessionError};
pub use session::{FieldErrors, FormSession, FormSubmission};
pub use validation::RuleEvaluator;

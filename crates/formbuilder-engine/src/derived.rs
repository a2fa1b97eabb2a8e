//! Derived value calculation
//!
//! Computes the value of a derived field from the current values of its
//! parent fields. The calculator never fails: a missing parent, a malformed
//! date or a non-numeric input degrades to the neutral result for the
//! calculation kind, so a derived field can never block the rest of the form.

use crate::helpers::{parse_date, parse_number, whole_years_between};
use chrono::{Local, NaiveDate};
use formbuilder_core::{CalculationKind, DerivedFieldConfig, FormValues, Value};
use tracing::debug;

/// Stateless derived value calculator
pub struct DerivedValueCalculator;

impl DerivedValueCalculator {
    /// Compute a derived value using today's local date
    pub fn compute(kind: CalculationKind, parent_fields: &[String], values: &FormValues) -> Value {
        Self::compute_on(kind, parent_fields, values, Local::now().date_naive())
    }

    /// Compute a derived field's value from its configuration
    pub fn compute_config(config: &DerivedFieldConfig, values: &FormValues) -> Value {
        Self::compute(config.calculation_type, &config.parent_fields, values)
    }

    /// Compute a derived value relative to `today`
    pub fn compute_on(
        kind: CalculationKind,
        parent_fields: &[String],
        values: &FormValues,
        today: NaiveDate,
    ) -> Value {
        match kind {
            CalculationKind::AgeFromBirthDate => Self::age(parent_fields, values, today),
            CalculationKind::Sum => Value::Number(Self::sum(parent_fields, values)),
            CalculationKind::Concat => Value::String(Self::concat(parent_fields, values)),
            CalculationKind::Custom | CalculationKind::Unknown => {
                debug!(kind = kind.as_str(), "calculation has no implementation");
                Value::empty()
            }
        }
    }

    fn age(parent_fields: &[String], values: &FormValues, today: NaiveDate) -> Value {
        let birth = parent_fields
            .first()
            .and_then(|id| values.get(id))
            .and_then(parse_date);

        match birth {
            Some(birth) => Value::Number(whole_years_between(birth, today) as f64),
            None => Value::empty(),
        }
    }

    fn sum(parent_fields: &[String], values: &FormValues) -> f64 {
        parent_fields
            .iter()
            .map(|id| values.get(id).and_then(parse_number).unwrap_or(0.0))
            .sum()
    }

    fn concat(parent_fields: &[String], values: &FormValues) -> String {
        parent_fields
            .iter()
            .map(|id| values.get(id).map(Value::to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

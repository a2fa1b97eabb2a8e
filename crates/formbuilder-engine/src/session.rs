//! Form fill session
//!
//! A `FormSession` holds the fields of one schema together with the values
//! entered so far. Every write is followed, synchronously, by recomputing
//! the derived fields whose parents changed. Recomputation cascades through
//! chains of derived fields and stops once no value changes, bounded by the
//! number of fields so cyclic configurations still terminate.

use crate::derived::DerivedValueCalculator;
use crate::error::{Result, SessionError};
use crate::validation::RuleEvaluator;
use chrono::{Local, NaiveDate};
use formbuilder_core::{FormField, FormValues, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation messages for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub field_id: String,
    pub messages: Vec<String>,
}

/// Snapshot of a session at submit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    /// Entered and derived values
    pub values: FormValues,
    /// Failing fields in form order
    pub errors: Vec<FieldErrors>,
    pub is_valid: bool,
}

/// Live state of one preview / fill of a form
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FormField>,
    values: FormValues,
    /// Fixed "today" for age calculations; local date when unset
    reference_date: Option<NaiveDate>,
}

impl FormSession {
    /// Start a session and compute every derived field once
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut session = Self {
            fields,
            values: FormValues::new(),
            reference_date: None,
        };
        session.recompute_all();
        session
    }

    /// Start a session whose age calculations use `today`
    pub fn with_reference_date(fields: Vec<FormField>, today: NaiveDate) -> Self {
        let mut session = Self {
            fields,
            values: FormValues::new(),
            reference_date: Some(today),
        };
        session.recompute_all();
        session
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Raw values entered or derived so far
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Store a value and recompute dependent derived fields.
    ///
    /// Returns the ids of derived fields whose value changed.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<Value>) -> Result<Vec<String>> {
        let field = self
            .field(field_id)
            .ok_or_else(|| SessionError::UnknownField(field_id.to_string()))?;
        if field.is_derived {
            return Err(SessionError::DerivedFieldReadOnly(field_id.to_string()));
        }

        let value = value.into();
        debug!(field = field_id, kind = value.type_name(), "set field value");
        self.values.insert(field_id.to_string(), value);

        Ok(self.propagate(vec![field_id.to_string()]))
    }

    /// Store several values at once, then recompute.
    ///
    /// Nothing is written if any id is unknown or derived.
    pub fn set_values<I>(&mut self, entries: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let entries: Vec<(String, Value)> = entries.into_iter().collect();
        for (id, _) in &entries {
            match self.field(id) {
                None => return Err(SessionError::UnknownField(id.clone())),
                Some(field) if field.is_derived => {
                    return Err(SessionError::DerivedFieldReadOnly(id.clone()))
                }
                Some(_) => {}
            }
        }

        let changed: Vec<String> = entries.iter().map(|(id, _)| id.clone()).collect();
        self.values.extend(entries);
        Ok(self.propagate(changed))
    }

    /// Value a field displays: the live value, else its default, else empty
    pub fn effective_value(&self, field_id: &str) -> Value {
        if let Some(value) = self.values.get(field_id).filter(|v| **v != Value::Null) {
            return value.clone();
        }

        self.field(field_id)
            .and_then(|f| f.default_value.clone())
            .filter(|v| *v != Value::Null)
            .unwrap_or_else(Value::empty)
    }

    /// Failing rule messages for one field. Unknown ids have no errors.
    pub fn errors_for(&self, field_id: &str) -> Vec<String> {
        match self.field(field_id) {
            Some(field) => {
                let value = self.effective_value(field_id);
                RuleEvaluator::evaluate(Some(&value), &field.validation_rules)
            }
            None => Vec::new(),
        }
    }

    /// Errors of every failing field, in form order
    pub fn validate_all(&self) -> Vec<FieldErrors> {
        self.fields
            .iter()
            .filter_map(|field| {
                let messages = self.errors_for(&field.id);
                if messages.is_empty() {
                    None
                } else {
                    Some(FieldErrors {
                        field_id: field.id.clone(),
                        messages,
                    })
                }
            })
            .collect()
    }

    /// Snapshot values and errors
    pub fn submit(&self) -> FormSubmission {
        let errors = self.validate_all();
        let is_valid = errors.is_empty();
        debug!(is_valid, failing = errors.len(), "form submitted");

        FormSubmission {
            values: self.values.clone(),
            errors,
            is_valid,
        }
    }

    /// Drop all entered values
    pub fn reset(&mut self) {
        self.values.clear();
        self.recompute_all();
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn recompute_all(&mut self) {
        let today = self.today();
        let mut changed = Vec::new();

        for field in &self.fields {
            if let Some(config) = field.derivation() {
                let value = DerivedValueCalculator::compute_on(
                    config.calculation_type,
                    &config.parent_fields,
                    &self.values,
                    today,
                );
                if self.values.get(&field.id) != Some(&value) {
                    self.values.insert(field.id.clone(), value);
                    changed.push(field.id.clone());
                }
            }
        }

        self.propagate(changed);
    }

    /// Recompute derived fields downstream of `changed` until stable
    fn propagate(&mut self, mut changed: Vec<String>) -> Vec<String> {
        let today = self.today();
        let mut updated: Vec<String> = Vec::new();

        for _ in 0..=self.fields.len() {
            if changed.is_empty() {
                break;
            }

            let mut next = Vec::new();
            for field in &self.fields {
                let Some(config) = field.derivation() else {
                    continue;
                };
                if !config.depends_on(&changed) {
                    continue;
                }

                let value = DerivedValueCalculator::compute_on(
                    config.calculation_type,
                    &config.parent_fields,
                    &self.values,
                    today,
                );
                if self.values.get(&field.id) != Some(&value) {
                    debug!(field = %field.id, "derived value changed");
                    self.values.insert(field.id.clone(), value);
                    next.push(field.id.clone());
                    if !updated.contains(&field.id) {
                        updated.push(field.id.clone());
                    }
                }
            }
            changed = next;
        }

        updated
    }
}

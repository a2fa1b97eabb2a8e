//! Field definitions
//!
//! A `FormField` is one input within a form schema. Field shapes use
//! camelCase keys on the wire so stored schemas stay readable by the
//! browser front end.

use super::rule::ValidationRule;
use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    /// All field types in editor order
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
    ];

    /// Whether the field picks from a list of options
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// One choice of a select or radio field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a derived field computes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    /// Whole years between the first parent's date and today
    #[serde(rename = "age_from_birth")]
    AgeFromBirthDate,
    /// Numeric sum of all parents
    Sum,
    /// Parents joined with a single space
    Concat,
    /// Reserved, always empty
    Custom,
    /// Any kind this version does not know about. Always empty.
    #[serde(other)]
    Unknown,
}

impl CalculationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::AgeFromBirthDate => "age_from_birth",
            CalculationKind::Sum => "sum",
            CalculationKind::Concat => "concat",
            CalculationKind::Custom => "custom",
            CalculationKind::Unknown => "unknown",
        }
    }
}

/// Configuration of a derived field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFieldConfig {
    /// Parent field ids, in argument order
    pub parent_fields: Vec<String>,

    /// Free-text formula, kept verbatim for `custom`
    #[serde(default)]
    pub formula: String,

    /// Calculation to apply
    pub calculation_type: CalculationKind,
}

impl DerivedFieldConfig {
    pub fn new(calculation_type: CalculationKind, parent_fields: Vec<String>) -> Self {
        Self {
            parent_fields,
            formula: String::new(),
            calculation_type,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    /// Whether any of `ids` is a parent of this field
    pub fn depends_on<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().any(|id| self.parent_fields.contains(id))
    }
}

/// A field in a form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique field id
    pub id: String,

    /// Input type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Label shown to the user
    pub label: String,

    /// Whether the field is marked required in the UI
    #[serde(default)]
    pub required: bool,

    /// Initial value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Validation rules in evaluation order
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,

    /// Choices, present only for select and radio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,

    /// Whether the value is computed from other fields
    #[serde(default)]
    pub is_derived: bool,

    /// Present iff `is_derived`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_config: Option<DerivedFieldConfig>,
}

impl FormField {
    /// Create a new field
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            default_value: None,
            validation_rules: Vec::new(),
            options: if field_type.is_choice() {
                Some(Vec::new())
            } else {
                None
            },
            is_derived: false,
            derived_config: None,
        }
    }

    /// Mark field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Append a validation rule
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    /// Append an option
    pub fn with_option(mut self, option: SelectOption) -> Self {
        self.options.get_or_insert_with(Vec::new).push(option);
        self
    }

    /// Turn the field into a derived field
    pub fn derived(mut self, config: DerivedFieldConfig) -> Self {
        self.is_derived = true;
        self.derived_config = Some(config);
        self
    }

    /// Derived configuration, only when the field is actually derived
    pub fn derivation(&self) -> Option<&DerivedFieldConfig> {
        if self.is_derived {
            self.derived_config.as_ref()
        } else {
            None
        }
    }

    /// Check the structural invariants of a field
    pub fn check_invariants(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidField {
                field: self.label.clone(),
                reason: "id must not be empty".to_string(),
            });
        }

        match (self.field_type.is_choice(), self.options.is_some()) {
            (true, false) => {
                return Err(CoreError::InvalidField {
                    field: self.id.clone(),
                    reason: format!("{} fields need options", self.field_type),
                })
            }
            (false, true) => {
                return Err(CoreError::InvalidField {
                    field: self.id.clone(),
                    reason: format!("{} fields cannot have options", self.field_type),
                })
            }
            _ => {}
        }

        if self.is_derived != self.derived_config.is_some() {
            return Err(CoreError::InvalidField {
                field: self.id.clone(),
                reason: "derived config must be present exactly when the field is derived"
                    .to_string(),
            });
        }

        let mut seen = Vec::with_capacity(self.validation_rules.len());
        for rule in &self.validation_rules {
            if rule.kind != super::rule::RuleKind::Unknown && seen.contains(&rule.kind) {
                return Err(CoreError::DuplicateRule {
                    field: self.id.clone(),
                    kind: rule.kind.to_string(),
                });
            }
            seen.push(rule.kind);
        }

        Ok(())
    }
}

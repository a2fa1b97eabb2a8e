//! Field editor
//!
//! `FieldDraft` collects the inputs of the "add field" panel: type, label,
//! default value, validation rules and options. Rules and options are
//! checked as they are added, and `build` produces a field that passes the
//! core structural checks.

use crate::error::{Result, SdkError};
use chrono::Utc;
use formbuilder_core::{
    DerivedFieldConfig, FieldType, FormField, RuleBound, RuleKind, SelectOption, ValidationRule,
    Value,
};
use rand::Rng;

const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// A rule kind offered by the editor, with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleChoice {
    pub kind: RuleKind,
    pub label: &'static str,
}

impl RuleChoice {
    const fn new(kind: RuleKind, label: &'static str) -> Self {
        Self { kind, label }
    }
}

/// Rule kinds the editor offers for a field type
pub fn available_rule_kinds(field_type: FieldType) -> Vec<RuleChoice> {
    let mut choices = vec![RuleChoice::new(RuleKind::Required, "Required")];
    match field_type {
        FieldType::Text | FieldType::Textarea => {
            choices.extend([
                RuleChoice::new(RuleKind::MinLength, "Minimum Length"),
                RuleChoice::new(RuleKind::MaxLength, "Maximum Length"),
                RuleChoice::new(RuleKind::Email, "Email Format"),
                RuleChoice::new(RuleKind::Password, "Password (8+ chars, 1 number)"),
            ]);
        }
        FieldType::Number => {
            choices.extend([
                RuleChoice::new(RuleKind::MinLength, "Minimum Value"),
                RuleChoice::new(RuleKind::MaxLength, "Maximum Value"),
            ]);
        }
        _ => {}
    }
    choices
}

/// Generate a field id: epoch milliseconds followed by a random base-36 suffix
pub fn generate_field_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}

/// Integer prefix of a string, 0 when there is none.
///
/// `" 12px"` reads as 12, `"-3"` as -3, `"abc"` as 0.
fn parse_int_prefix(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

/// In-progress field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    /// Raw default value input; empty means no default
    pub default_value: String,
    rules: Vec<ValidationRule>,
    options: Vec<SelectOption>,
    derived: Option<DerivedFieldConfig>,
    /// Non-string default of the field being edited, kept while its text is untouched
    typed_default: Option<Value>,
}

impl FieldDraft {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            label: String::new(),
            required: false,
            default_value: String::new(),
            rules: Vec::new(),
            options: Vec::new(),
            derived: None,
            typed_default: None,
        }
    }

    /// Start editing an existing field
    pub fn from_field(field: &FormField) -> Self {
        Self {
            field_type: field.field_type,
            label: field.label.clone(),
            required: field.required,
            default_value: field
                .default_value
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default(),
            rules: field.validation_rules.clone(),
            options: field.options.clone().unwrap_or_default(),
            derived: field.derivation().cloned(),
            typed_default: field
                .default_value
                .clone()
                .filter(|v| !matches!(v, Value::String(_))),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = default.into();
        self
    }

    /// Compute this field from other fields
    pub fn with_derived(mut self, config: DerivedFieldConfig) -> Self {
        self.derived = Some(config);
        self
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn derived(&self) -> Option<&DerivedFieldConfig> {
        self.derived.as_ref()
    }

    /// Change the type, dropping rules the new type does not offer
    pub fn set_field_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
        let offered = available_rule_kinds(field_type);
        self.rules
            .retain(|rule| offered.iter().any(|choice| choice.kind == rule.kind));
    }

    /// Add a validation rule.
    ///
    /// `raw_bound` is only read for min/max rules, where it must be
    /// non-empty; it is read as an integer prefix and falls back to 0.
    pub fn add_rule(&mut self, kind: RuleKind, raw_bound: &str, message: &str) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SdkError::InvalidDraft(
                "rule message must not be empty".to_string(),
            ));
        }

        if !available_rule_kinds(self.field_type)
            .iter()
            .any(|choice| choice.kind == kind)
        {
            return Err(SdkError::RuleNotAvailable {
                kind,
                field_type: self.field_type,
            });
        }

        if self.rules.iter().any(|rule| rule.kind == kind) {
            return Err(SdkError::DuplicateRule(kind));
        }

        let mut rule = ValidationRule::new(kind, message);
        if kind.needs_bound() {
            if raw_bound.trim().is_empty() {
                return Err(SdkError::InvalidDraft(format!("{} needs a value", kind)));
            }
            rule = rule.with_bound(RuleBound::Number(parse_int_prefix(raw_bound) as f64));
        }

        self.rules.push(rule);
        Ok(())
    }

    pub fn remove_rule(&mut self, index: usize) -> Option<ValidationRule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Add a choice; value and label are trimmed and the value must be unique
    pub fn add_option(&mut self, value: &str, label: &str) -> Result<()> {
        let value = value.trim();
        let label = label.trim();
        if value.is_empty() || label.is_empty() {
            return Err(SdkError::InvalidDraft(
                "option value and label must not be empty".to_string(),
            ));
        }
        if self.options.iter().any(|o| o.value == value) {
            return Err(SdkError::DuplicateOption(value.to_string()));
        }
        self.options.push(SelectOption::new(value, label));
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> Option<SelectOption> {
        (index < self.options.len()).then(|| self.options.remove(index))
    }

    /// Build the field with a freshly generated id
    pub fn build(&self) -> Result<FormField> {
        self.build_with_id(generate_field_id())
    }

    /// Build the field under a given id
    pub fn build_with_id(&self, id: impl Into<String>) -> Result<FormField> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(SdkError::InvalidDraft(
                "field label must not be empty".to_string(),
            ));
        }

        let default_value = match &self.typed_default {
            Some(typed) if typed.to_string() == self.default_value => Some(typed.clone()),
            _ => (!self.default_value.is_empty())
                .then(|| Value::String(self.default_value.clone())),
        };

        let field = FormField {
            id: id.into(),
            field_type: self.field_type,
            label: label.to_string(),
            required: self.required,
            default_value,
            validation_rules: self.rules.clone(),
            options: self
                .field_type
                .is_choice()
                .then(|| self.options.clone()),
            is_derived: self.derived.is_some(),
            derived_config: self.derived.clone(),
        };

        field.check_invariants()?;
        Ok(field)
    }
}

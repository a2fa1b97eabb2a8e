//! Validation rule definitions
//!
//! A rule is a named predicate plus the message shown when it fails. Rules
//! are attached to a field in display order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// Value must be present and not blank
    Required,
    /// String length lower bound
    MinLength,
    /// String length upper bound
    MaxLength,
    /// `local@domain.tld` shape
    Email,
    /// At least 8 characters including one digit
    Password,
    /// Any kind this version does not know about. Always passes.
    #[serde(other)]
    Unknown,
}

impl RuleKind {
    /// Whether this kind needs a numeric bound
    pub fn needs_bound(&self) -> bool {
        matches!(self, RuleKind::MinLength | RuleKind::MaxLength)
    }

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength => "minLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
            RuleKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule parameter. Editors store numbers, but hand-written schemas may
/// carry numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleBound {
    Number(f64),
    Text(String),
}

impl RuleBound {
    /// Numeric reading of the bound, if it has one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleBound::Number(n) => Some(*n),
            RuleBound::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// A validation rule attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Bound for length rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleBound>,

    /// Message shown when the rule fails
    pub message: String,
}

impl ValidationRule {
    /// Create a rule without a bound
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            value: None,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Required, message)
    }

    pub fn min_length(bound: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MinLength, message).with_bound(RuleBound::Number(bound as f64))
    }

    pub fn max_length(bound: usize, message: impl Into<String>) -> Self {
        Self::new(RuleKind::MaxLength, message).with_bound(RuleBound::Number(bound as f64))
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Email, message)
    }

    pub fn password(message: impl Into<String>) -> Self {
        Self::new(RuleKind::Password, message)
    }

    /// Set the bound
    pub fn with_bound(mut self, bound: RuleBound) -> Self {
        self.value = Some(bound);
        self
    }

    /// Numeric bound, `None` when absent or not a number
    pub fn bound(&self) -> Option<f64> {
        self.value.as_ref().and_then(RuleBound::as_number)
    }
}

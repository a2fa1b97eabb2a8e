//! Runtime value types for form fields
//!
//! The `Value` enum represents the raw value a user entered into one field.
//! Form inputs only ever produce scalars, so unlike a general JSON value
//! there are no arrays or objects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly cleared value
    Null,
    /// Checkbox value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// Text, select, radio and date inputs
    String(String),
}

/// Live state of one in-progress form fill, keyed by field id
pub type FormValues = HashMap<String, Value>;

impl Value {
    /// The empty string, used as the neutral "nothing entered" value
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Whether this value counts as missing.
    ///
    /// Only `Null` and all-whitespace strings are missing. `0` and `false`
    /// are legitimate entries.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }
}

/// String form of a value. `Null` renders as the empty string, integral
/// numbers render without a fractional part.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

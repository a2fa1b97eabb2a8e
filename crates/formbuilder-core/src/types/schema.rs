//! Form schema definitions
//!
//! A schema is a named, ordered list of fields. Saved schemas carry an id and
//! a creation timestamp; the form being edited is a `FormDraft`.

use super::field::FormField;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Schema id
    pub id: String,

    /// Form name
    pub name: String,

    /// Fields in display order
    pub fields: Vec<FormField>,

    /// Creation time, RFC 3339 on the wire
    pub created_at: DateTime<Utc>,
}

impl FormSchema {
    /// Create a new schema stamped with the current time
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
            created_at: Utc::now(),
        }
    }

    /// Override the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Get a field by id
    pub fn get_field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Check every field's invariants
    pub fn check_invariants(&self) -> Result<()> {
        self.fields.iter().try_for_each(FormField::check_invariants)
    }
}

/// The form currently being edited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub fields: Vec<FormField>,
}

impl FormDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// A draft can be saved once it has a name and at least one field
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.fields.is_empty()
    }

    /// Whether nothing has been entered yet
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.fields.is_empty()
    }

    pub fn get_field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl From<FormSchema> for FormDraft {
    fn from(schema: FormSchema) -> Self {
        Self {
            name: schema.name,
            fields: schema.fields,
        }
    }
}

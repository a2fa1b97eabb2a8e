//! Form builder SDK
//!
//! High-level API for building forms, saving them, and previewing them.
//!
//! ```rust,ignore
//! use formbuilder_sdk::{FieldDraft, FieldType, RuleKind, WorkspaceBuilder};
//!
//! let mut workspace = WorkspaceBuilder::new().build().await?;
//! workspace.set_form_name("Signup");
//!
//! let mut email = FieldDraft::new(FieldType::Text).with_label("Email");
//! email.add_rule(RuleKind::Required, "", "Email is required")?;
//! email.add_rule(RuleKind::Email, "", "Enter a valid email")?;
//! workspace.add_field(email.build()?)?;
//!
//! let mut preview = workspace.start_preview();
//! let saved = workspace.save_current_form().await?;
//! ```

pub mod builder;
pub mod config;
pub mod editor;
pub mod error;
pub mod navigation;
pub mod workspace;

// Re-export main types
pub use builder::WorkspaceBuilder;
pub use config::WorkspaceConfig;
pub use editor::{available_rule_kinds, generate_field_id, FieldDraft, RuleChoice};
pub use error::{Result, SdkError};
pub use navigation::{NavigationState, ViewType};
pub use workspace::{FieldPatch, FormWorkspace};

// Re-export commonly used types from dependencies
pub use formbuilder_core::{
    CalculationKind, DerivedFieldConfig, FieldType, FormDraft, FormField, FormSchema, FormValues,
    RuleKind, SelectOption, ValidationRule, Value,
};
pub use formbuilder_engine::{
    DerivedValueCalculator, FieldErrors, FormSession, FormSubmission, RuleEvaluator,
};
pub use formbuilder_repository::{FormRepository, RepositoryConfig, RepositorySource};

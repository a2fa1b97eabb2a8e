//! Editor state
//!
//! `FormWorkspace` owns the form being edited, the list of saved forms and
//! the navigation state, and writes saved forms through a `FormRepository`.

use crate::config::WorkspaceConfig;
use crate::error::{Result, SdkError};
use crate::navigation::{NavigationState, ViewType};
use chrono::Utc;
use formbuilder_core::{
    CoreError, DerivedFieldConfig, FieldType, FormDraft, FormField, FormSchema, SelectOption,
    ValidationRule, Value,
};
use formbuilder_engine::FormSession;
use formbuilder_repository::FormRepository;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Partial update of a field. `None` leaves the attribute unchanged.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<Option<Value>>,
    pub validation_rules: Option<Vec<ValidationRule>>,
    pub options: Option<Option<Vec<SelectOption>>>,
    pub derived_config: Option<Option<DerivedFieldConfig>>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: Option<Value>) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn validation_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation_rules = Some(rules);
        self
    }

    /// Merge into a field
    pub fn apply(&self, field: &mut FormField) {
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(default_value) = &self.default_value {
            field.default_value = default_value.clone();
        }
        if let Some(rules) = &self.validation_rules {
            field.validation_rules = rules.clone();
        }
        if let Some(options) = &self.options {
            field.options = options.clone();
        }
        if let Some(derived) = &self.derived_config {
            field.is_derived = derived.is_some();
            field.derived_config = derived.clone();
        }
    }
}

/// Form builder workspace
pub struct FormWorkspace {
    config: WorkspaceConfig,
    repository: Arc<dyn FormRepository>,
    current: FormDraft,
    saved_forms: Vec<FormSchema>,
    navigation: NavigationState,
}

impl FormWorkspace {
    /// Create an empty workspace over a repository
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self::with_config(repository, WorkspaceConfig::default())
    }

    pub fn with_config(repository: Arc<dyn FormRepository>, config: WorkspaceConfig) -> Self {
        Self {
            config,
            repository,
            current: FormDraft::default(),
            saved_forms: Vec::new(),
            navigation: NavigationState::new(),
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn FormRepository> {
        &self.repository
    }

    /// The form being edited
    pub fn current_form(&self) -> &FormDraft {
        &self.current
    }

    pub fn saved_forms(&self) -> &[FormSchema] {
        &self.saved_forms
    }

    pub fn saved_form(&self, id: &str) -> Result<&FormSchema> {
        self.saved_forms
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| SdkError::FormNotFound(id.to_string()))
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    // ========== Current form ==========

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.current.name = name.into();
    }

    /// Append a field to the current form
    pub fn add_field(&mut self, field: FormField) -> Result<()> {
        field.check_invariants()?;
        if self.current.get_field(&field.id).is_some() {
            return Err(CoreError::InvalidField {
                field: field.id,
                reason: "duplicate field id".to_string(),
            }
            .into());
        }
        debug!(field_id = %field.id, field_type = %field.field_type, "adding field");
        self.current.fields.push(field);
        Ok(())
    }

    /// Merge a patch into a field.
    ///
    /// Returns `Ok(false)` when no field has this id. A patch that would
    /// break the field's structure is rejected and nothing changes.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> Result<bool> {
        let Some(field) = self.current.fields.iter_mut().find(|f| f.id == id) else {
            return Ok(false);
        };

        let mut updated = field.clone();
        patch.apply(&mut updated);
        updated.check_invariants()?;
        *field = updated;
        Ok(true)
    }

    pub fn delete_field(&mut self, id: &str) -> bool {
        let before = self.current.fields.len();
        self.current.fields.retain(|f| f.id != id);
        self.current.fields.len() != before
    }

    /// Move the field at `drag_index` to `hover_index`
    pub fn reorder_fields(&mut self, drag_index: usize, hover_index: usize) -> bool {
        let len = self.current.fields.len();
        if drag_index >= len || hover_index >= len {
            return false;
        }
        let field = self.current.fields.remove(drag_index);
        self.current.fields.insert(hover_index, field);
        true
    }

    pub fn clear_current_form(&mut self) {
        self.current = FormDraft::default();
    }

    // ========== Saved forms ==========

    /// Save the current form and start a fresh draft.
    ///
    /// A storage failure is logged; the form is still kept in the saved list.
    pub async fn save_current_form(&mut self) -> Result<FormSchema> {
        if !self.current.is_complete() {
            return Err(SdkError::IncompleteForm);
        }

        let draft = std::mem::take(&mut self.current);
        let schema = FormSchema::new(self.next_form_id(), draft.name, draft.fields);

        if let Err(e) = self.repository.save_form(&schema).await {
            error!(form_id = %schema.id, error = %e, "failed to persist saved form");
        }

        info!(form_id = %schema.id, name = %schema.name, "saved form");
        self.saved_forms.push(schema.clone());
        Ok(schema)
    }

    /// Save a complete form in one step, independent of the current draft.
    ///
    /// Every field is checked, and a storage failure is returned rather than
    /// logged.
    pub async fn save_form(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FormField>,
    ) -> Result<FormSchema> {
        let draft = FormDraft {
            name: name.into(),
            fields,
        };
        if !draft.is_complete() {
            return Err(SdkError::IncompleteForm);
        }
        for (i, field) in draft.fields.iter().enumerate() {
            field.check_invariants()?;
            if draft.fields[..i].iter().any(|f| f.id == field.id) {
                return Err(CoreError::InvalidField {
                    field: field.id.clone(),
                    reason: "duplicate field id".to_string(),
                }
                .into());
            }
        }

        let schema = FormSchema::new(self.next_form_id(), draft.name, draft.fields);
        self.repository.save_form(&schema).await?;

        info!(form_id = %schema.id, name = %schema.name, "saved form");
        self.saved_forms.push(schema.clone());
        Ok(schema)
    }

    /// Replace the saved list with what the repository holds.
    ///
    /// A load failure is logged and leaves an empty list.
    pub async fn load_saved_forms(&mut self) -> &[FormSchema] {
        self.saved_forms = match self.repository.load_forms().await {
            Ok(forms) => {
                debug!(count = forms.len(), "loaded saved forms");
                forms
            }
            Err(e) => {
                error!(error = %e, "failed to load saved forms");
                Vec::new()
            }
        };
        &self.saved_forms
    }

    /// Copy a saved form into the current draft
    pub fn load_form_for_preview(&mut self, id: &str) -> Result<()> {
        let schema = self.saved_form(id)?;
        self.current = FormDraft::from(schema.clone());
        Ok(())
    }

    /// Remove a saved form. Returns whether it was in the saved list.
    pub async fn delete_saved_form(&mut self, id: &str) -> Result<bool> {
        let before = self.saved_forms.len();
        self.saved_forms.retain(|f| f.id != id);
        let removed = self.saved_forms.len() != before;

        if let Err(e) = self.repository.delete_form(id).await {
            warn!(form_id = %id, error = %e, "failed to delete form from storage");
        }
        if self.navigation.selected_form_id.as_deref() == Some(id) {
            self.navigation.clear_selection();
        }
        Ok(removed)
    }

    // ========== Preview ==========

    /// Preview session over the current draft
    pub fn start_preview(&self) -> FormSession {
        self.session_for(self.current.fields.clone())
    }

    /// Fill session over a saved form
    pub fn start_session(&self, id: &str) -> Result<FormSession> {
        let schema = self.saved_form(id)?;
        Ok(self.session_for(schema.fields.clone()))
    }

    fn session_for(&self, fields: Vec<FormField>) -> FormSession {
        match self.config.reference_date {
            Some(today) => FormSession::with_reference_date(fields, today),
            None => FormSession::new(fields),
        }
    }

    // ========== Navigation ==========

    pub fn set_current_view(&mut self, view: ViewType) {
        self.navigation.set_current_view(view);
    }

    pub fn select_form(&mut self, id: impl Into<String>) {
        self.navigation.select_form(id);
    }

    /// Epoch milliseconds, bumped past any id already in the saved list
    fn next_form_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        while self
            .saved_forms
            .iter()
            .any(|f| f.id == millis.to_string())
        {
            millis += 1;
        }
        millis.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbuilder_repository::MemoryRepository;

    fn workspace() -> FormWorkspace {
        FormWorkspace::new(Arc::new(MemoryRepository::new()))
    }

    fn text(id: &str) -> FormField {
        FormField::new(id, FieldType::Text, id.to_uppercase())
    }

    fn ids(ws: &FormWorkspace) -> Vec<String> {
        ws.current_form()
            .fields
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }

    #[test]
    fn test_add_and_delete_fields() {
        let mut ws = workspace();
        ws.add_field(text("a")).unwrap();
        ws.add_field(text("b")).unwrap();

        assert!(ws.add_field(text("a")).is_err());
        assert!(ws.delete_field("a"));
        assert!(!ws.delete_field("a"));
        assert_eq!(ids(&ws), vec!["b"]);
    }

    #[test]
    fn test_add_field_checks_invariants() {
        let mut ws = workspace();
        let mut field = FormField::new("s", FieldType::Select, "S");
        field.options = None;
        assert!(matches!(ws.add_field(field), Err(SdkError::CoreError(_))));
    }

    #[test]
    fn test_reorder_fields() {
        let mut ws = workspace();
        for id in ["a", "b", "c", "d"] {
            ws.add_field(text(id)).unwrap();
        }

        assert!(ws.reorder_fields(0, 2));
        assert_eq!(ids(&ws), vec!["b", "c", "a", "d"]);

        assert!(ws.reorder_fields(3, 0));
        assert_eq!(ids(&ws), vec!["d", "b", "c", "a"]);

        assert!(!ws.reorder_fields(4, 0));
        assert_eq!(ids(&ws), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_update_field_merges() {
        let mut ws = workspace();
        ws.add_field(text("a").required()).unwrap();

        let updated = ws
            .update_field("a", FieldPatch::new().label("Renamed"))
            .unwrap();
        assert!(updated);

        let field = &ws.current_form().fields[0];
        assert_eq!(field.label, "Renamed");
        assert!(field.required);

        assert!(!ws.update_field("missing", FieldPatch::new()).unwrap());
    }

    #[test]
    fn test_update_field_rejects_broken_structure() {
        let mut ws = workspace();
        ws.add_field(text("a")).unwrap();

        let patch = FieldPatch {
            field_type: Some(FieldType::Radio),
            ..FieldPatch::default()
        };
        assert!(ws.update_field("a", patch).is_err());
        assert_eq!(ws.current_form().fields[0].field_type, FieldType::Text);
    }

    #[tokio::test]
    async fn test_save_requires_name_and_fields() {
        let mut ws = workspace();
        assert!(matches!(
            ws.save_current_form().await,
            Err(SdkError::IncompleteForm)
        ));

        ws.set_form_name("   ");
        ws.add_field(text("a")).unwrap();
        assert!(matches!(
            ws.save_current_form().await,
            Err(SdkError::IncompleteForm)
        ));

        ws.set_form_name("Survey");
        let saved = ws.save_current_form().await.unwrap();
        assert_eq!(saved.name, "Survey");
        assert!(ws.current_form().is_empty());
        assert_eq!(ws.saved_forms().len(), 1);
    }

    #[tokio::test]
    async fn test_saved_form_ids_are_unique() {
        let mut ws = workspace();
        let a = ws.save_form("A", vec![text("x")]).await.unwrap();
        let b = ws.save_form("B", vec![text("x")]).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_save_form_rejects_duplicate_field_ids() {
        let mut ws = workspace();
        let result = ws.save_form("A", vec![text("x"), text("x")]).await;
        assert!(matches!(result, Err(SdkError::CoreError(_))));
        assert!(ws.saved_forms().is_empty());
    }

    #[tokio::test]
    async fn test_load_form_for_preview() {
        let mut ws = workspace();
        let saved = ws.save_form("Intake", vec![text("x")]).await.unwrap();

        ws.load_form_for_preview(&saved.id).unwrap();
        assert_eq!(ws.current_form().name, "Intake");
        assert_eq!(ids(&ws), vec!["x"]);

        assert!(matches!(
            ws.load_form_for_preview("nope"),
            Err(SdkError::FormNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_saved_form_clears_selection() {
        let mut ws = workspace();
        let saved = ws.save_form("A", vec![text("x")]).await.unwrap();
        ws.select_form(saved.id.clone());

        assert!(ws.delete_saved_form(&saved.id).await.unwrap());
        assert!(ws.saved_forms().is_empty());
        assert!(ws.navigation().selected_form_id.is_none());
        assert!(!ws.delete_saved_form(&saved.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty() {
        let repo = Arc::new(MemoryRepository::with_payload("corrupt"));
        let mut ws = FormWorkspace::new(repo);
        assert!(ws.load_saved_forms().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_over_corrupt_storage_persists() {
        let repo = Arc::new(MemoryRepository::with_payload("corrupt"));
        let mut ws = FormWorkspace::new(repo.clone());
        ws.load_saved_forms().await;

        ws.set_form_name("Survey");
        ws.add_field(text("a")).unwrap();
        let saved = ws.save_current_form().await.unwrap();

        let stored = repo.load_forms().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, saved.id);
    }

    #[test]
    fn test_navigation() {
        let mut ws = workspace();
        assert_eq!(ws.navigation().current_view, ViewType::CreateForm);

        ws.set_current_view(ViewType::MyForms);
        ws.select_form("42");
        assert_eq!(ws.navigation().current_view, ViewType::PreviewForm);
        assert_eq!(ws.navigation().selected_form_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_clear_current_form() {
        let mut ws = workspace();
        ws.set_form_name("Draft");
        ws.add_field(text("a")).unwrap();
        ws.clear_current_form();
        assert!(ws.current_form().is_empty());
    }
}

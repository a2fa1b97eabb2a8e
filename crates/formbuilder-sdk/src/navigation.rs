//! Which screen of the builder is showing

use serde::{Deserialize, Serialize};

/// Top-level view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewType {
    #[default]
    CreateForm,
    PreviewForm,
    MyForms,
}

/// Current view plus the saved form picked for preview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub current_view: ViewType,
    pub selected_form_id: Option<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_view(&mut self, view: ViewType) {
        self.current_view = view;
    }

    /// Pick a saved form; always switches to the preview
    pub fn select_form(&mut self, id: impl Into<String>) {
        self.selected_form_id = Some(id.into());
        self.current_view = ViewType::PreviewForm;
    }

    pub fn clear_selection(&mut self) {
        self.selected_form_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_view, ViewType::CreateForm);
        assert!(nav.selected_form_id.is_none());
    }

    #[test]
    fn test_select_form_switches_to_preview() {
        let mut nav = NavigationState::new();
        nav.set_current_view(ViewType::MyForms);
        nav.select_form("1700000000000");

        assert_eq!(nav.current_view, ViewType::PreviewForm);
        assert_eq!(nav.selected_form_id.as_deref(), Some("1700000000000"));

        nav.set_current_view(ViewType::MyForms);
        assert_eq!(nav.selected_form_id.as_deref(), Some("1700000000000"));
    }

    #[test]
    fn test_view_wire_names() {
        assert_eq!(
            serde_json::to_string(&ViewType::PreviewForm).unwrap(),
            "\"PREVIEW_FORM\""
        );
        let view: ViewType = serde_json::from_str("\"MY_FORMS\"").unwrap();
        assert_eq!(view, ViewType::MyForms);
    }
}

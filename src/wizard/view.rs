// ABOUTME: View abstraction between the wizard controller and whatever displays the pages
// FormView keeps panel visibility and form values in memory for the terminal UI

use std::collections::{BTreeMap, BTreeSet};

use super::page::{ControlKind, Page};

/// Surface the controller drives. Elements the view does not know about are ignored.
#[cfg_attr(test, mockall::automock)]
pub trait WizardView {
    /// Make the panel for a page visible
    fn show(&mut self, page_id: &str);

    /// Hide the panel for a page
    fn hide(&mut self, page_id: &str);

    /// Checkbox state, or `None` when the checkbox does not exist
    fn is_checked(&self, id: &str) -> Option<bool>;

    /// Text field value, or `None` when the field does not exist
    fn field_value(&self, id: &str) -> Option<String>;

    /// Replace the verification status message
    fn set_status(&mut self, message: &str);

    /// Highlight or clear a path selector
    fn set_selector_active(&mut self, control_id: &str, active: bool);
}

/// In-memory form model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    panels: BTreeSet<String>,
    visible: BTreeSet<String>,
    checkboxes: BTreeMap<String, bool>,
    fields: BTreeMap<String, String>,
    active_selectors: BTreeSet<String>,
    status: String,
}

impl FormView {
    /// Build a view holding one panel per page and every page control at its default
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut view = Self::default();
        for page in pages {
            view.panels.insert(page.id.clone());
            for control in &page.controls {
                match &control.kind {
                    ControlKind::Checkbox { checked } => {
                        view.checkboxes.insert(control.id.clone(), *checked);
                    }
                    ControlKind::Choice(options) => {
                        let first = options.first().map(|(value, _)| value.clone()).unwrap_or_default();
                        view.fields.insert(control.id.clone(), first);
                    }
                    ControlKind::Text | ControlKind::Password | ControlKind::Path(_) => {
                        view.fields.insert(control.id.clone(), String::new());
                    }
                }
            }
        }
        view
    }

    #[must_use]
    pub fn with_panel(mut self, page_id: &str) -> Self {
        self.panels.insert(page_id.to_string());
        self
    }

    #[must_use]
    pub fn with_checkbox(mut self, id: &str, checked: bool) -> Self {
        self.checkboxes.insert(id.to_string(), checked);
        self
    }

    #[must_use]
    pub fn with_field(mut self, id: &str, value: &str) -> Self {
        self.fields.insert(id.to_string(), value.to_string());
        self
    }

    /// Set a checkbox; returns false if it does not exist
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.checkboxes.get_mut(id) {
            Some(state) => {
                *state = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.checkboxes.get_mut(id) {
            Some(state) => {
                *state = !*state;
                true
            }
            None => false,
        }
    }

    /// Set a text field; returns false if it does not exist
    pub fn set_field(&mut self, id: &str, value: &str) -> bool {
        match self.fields.get_mut(id) {
            Some(field) => {
                value.clone_into(field);
                true
            }
            None => false,
        }
    }

    pub fn push_char(&mut self, id: &str, c: char) {
        if let Some(field) = self.fields.get_mut(id) {
            field.push(c);
        }
    }

    pub fn pop_char(&mut self, id: &str) {
        if let Some(field) = self.fields.get_mut(id) {
            field.pop();
        }
    }

    pub fn is_visible(&self, page_id: &str) -> bool {
        self.visible.contains(page_id)
    }

    pub fn visible_panels(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }

    pub fn selector_active(&self, control_id: &str) -> bool {
        self.active_selectors.contains(control_id)
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl WizardView for FormView {
    fn show(&mut self, page_id: &str) {
        if self.panels.contains(page_id) {
            self.visible.insert(page_id.to_string());
        }
    }

    fn hide(&mut self, page_id: &str) {
        self.visible.remove(page_id);
    }

    fn is_checked(&self, id: &str) -> Option<bool> {
        self.checkboxes.get(id).copied()
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }

    fn set_status(&mut self, message: &str) {
        message.clone_into(&mut self.status);
    }

    fn set_selector_active(&mut self, control_id: &str, active: bool) {
        if active {
            self.active_selectors.insert(control_id.to_string());
        } else {
            self.active_selectors.remove(control_id);
        }
    }
}

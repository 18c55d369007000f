// ABOUTME: Settings collected from the wizard form when the user finishes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::page::{fields, ControlKind, Page};
use super::view::WizardView;

/// Every form value at finish time, the full-form analog of a settings submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSettings {
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    #[serde(default)]
    pub checkboxes: BTreeMap<String, bool>,

    #[serde(default)]
    pub account_verified: bool,
}

impl WizardSettings {
    /// Read every control of every page, visible or not
    pub fn collect<V: WizardView + ?Sized>(pages: &[Page], view: &V, account_verified: bool) -> Self {
        let mut settings = Self {
            account_verified,
            ..Self::default()
        };

        for control in pages.iter().flat_map(|p| p.controls.iter()) {
            match control.kind {
                ControlKind::Checkbox { .. } => {
                    if let Some(checked) = view.is_checked(&control.id) {
                        settings.checkboxes.insert(control.id.clone(), checked);
                    }
                }
                _ => {
                    if let Some(value) = view.field_value(&control.id) {
                        settings.fields.insert(control.id.clone(), value);
                    }
                }
            }
        }

        settings.language = settings.fields.remove(fields::LANGUAGE);
        settings
    }

    /// Remove a value that must not be stored in plain text
    pub fn take_secret(&mut self, id: &str) -> Option<String> {
        self.fields.remove(id).filter(|v| !v.is_empty())
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checkboxes.get(id).copied().unwrap_or(false)
    }
}

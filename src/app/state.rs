// ABOUTME: Application state for the terminal wizard
// Owns the controller, the focused control, and the outcome the main loop acts on

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{SetupRecord, WizardConfig};
use crate::wizard::page::fields;
use crate::wizard::{
    default_pages, Control, FormView, HttpVerifier, Strings, VerificationDispatcher,
    VerificationResponse, VerifyClient, WizardController, WizardError, WizardSettings, WizardView,
};

/// What the wizard asks the host to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Settings submitted from the last page
    Finished(WizardSettings),
    /// Language selector changed; the host persists it and reloads the wizard
    LanguageChanged(String),
    Cancelled,
}

pub struct AppState<D> {
    pub controller: WizardController<FormView, D>,
    pub strings: Strings,
    /// Index of the focused control on the current page
    pub focus: usize,
    pub show_cursor: bool,
    pub outcome: Option<WizardOutcome>,
}

impl<D: VerificationDispatcher> AppState<D> {
    /// Build the wizard from config, prefilled from an earlier setup record
    pub fn new(
        config: &WizardConfig,
        previous: Option<&SetupRecord>,
        password: Option<String>,
        dispatcher: D,
    ) -> Result<Self, WizardError> {
        // Unknown or lowercase codes resolve to a code the language choice lists
        let strings = Strings::new(&config.ui_preferences.language);
        let pages = default_pages();
        let mut view = FormView::from_pages(&pages);

        if let Some(record) = previous {
            for (id, value) in &record.fields {
                view.set_field(id, value);
            }
            for (id, checked) in &record.checkboxes {
                view.set_checked(id, *checked);
            }
        }
        if let Some(password) = password {
            view.set_field(fields::SN_PASSWORD, &password);
        }
        view.set_field(fields::LANGUAGE, strings.language());

        let mut controller = WizardController::new(pages, config.features, view, dispatcher)?;
        controller.init();

        Ok(Self {
            controller,
            strings,
            focus: 0,
            show_cursor: true,
            outcome: None,
        })
    }

    pub fn controls(&self) -> &[Control] {
        &self.controller.current_page().controls
    }

    pub fn focused_control(&self) -> Option<&Control> {
        self.controls().get(self.focus)
    }

    pub fn focus_next(&mut self) {
        let count = self.controls().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.controls().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    pub fn toggle_cursor(&mut self) {
        self.show_cursor = !self.show_cursor;
    }

    /// Apply every verification reply that has arrived; returns how many were applied
    pub fn apply_replies(&mut self, replies: &mut mpsc::UnboundedReceiver<VerificationResponse>) -> usize {
        let mut applied = 0;
        while let Ok(reply) = replies.try_recv() {
            self.controller.apply_verification(&reply);
            applied += 1;
        }
        if applied > 0 {
            debug!("Applied {} verification repl(ies)", applied);
        }
        applied
    }

    pub fn status_message(&self) -> &str {
        self.controller.view().status()
    }

    pub fn field(&self, id: &str) -> String {
        self.controller.view().field_value(id).unwrap_or_default()
    }
}

/// Terminal wizard wired to the real verification endpoint
pub struct App {
    pub state: AppState<HttpVerifier>,
    replies: mpsc::UnboundedReceiver<VerificationResponse>,
}

impl App {
    pub fn new(config: &WizardConfig, previous: Option<&SetupRecord>, password: Option<String>) -> Result<Self> {
        let client = VerifyClient::new(&config.server.url)
            .with_context(|| format!("Failed to create verification client for {}", config.server.url))?;
        let (verifier, replies) = HttpVerifier::channel(client);

        let state = AppState::new(config, previous, password, verifier)?;
        info!("Wizard started with {} pages", state.controller.pages().len());

        Ok(Self { state, replies })
    }

    /// Periodic work between key events
    pub fn tick(&mut self) {
        self.state.apply_replies(&mut self.replies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::NoopDispatcher;

    #[test]
    fn test_new_state_starts_on_welcome() {
        let state = AppState::new(&WizardConfig::default(), None, None, NoopDispatcher).unwrap();
        assert_eq!(state.controller.current_page().id, "welcome");
        assert!(state.controller.view().is_visible("welcome"));
        assert_eq!(state.field("language"), "EN");
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_prefill_from_record() {
        let mut record = SetupRecord::default();
        record.fields.insert("sn_email".to_string(), "user@example.com".to_string());
        record.checkboxes.insert("itunes".to_string(), true);

        let state = AppState::new(
            &WizardConfig::default(),
            Some(&record),
            Some("secret".to_string()),
            NoopDispatcher,
        )
        .unwrap();

        assert_eq!(state.field("sn_email"), "user@example.com");
        assert_eq!(state.field("sn_password"), "secret");
        assert_eq!(state.controller.view().is_checked("itunes"), Some(true));
    }

    #[test]
    fn test_language_code_is_normalized() {
        let mut config = WizardConfig::default();
        config.ui_preferences.language = "de".to_string();

        let state = AppState::new(&config, None, None, NoopDispatcher).unwrap();
        assert_eq!(state.field("language"), "DE");
        assert_eq!(state.strings.language(), "DE");

        config.ui_preferences.language = "xx".to_string();
        let state = AppState::new(&config, None, None, NoopDispatcher).unwrap();
        assert_eq!(state.field("language"), "EN");
    }

    #[test]
    fn test_focus_wraps() {
        let mut state = AppState::new(&WizardConfig::default(), None, None, NoopDispatcher).unwrap();
        state.controller.next(); // sqn has two controls
        state.reset_focus();

        state.focus_next();
        assert_eq!(state.focused_control().map(|c| c.id.as_str()), Some("sn_password"));
        state.focus_next();
        assert_eq!(state.focus, 0);
        state.focus_previous();
        assert_eq!(state.focus, 1);
    }

    #[tokio::test]
    async fn test_apply_replies_drains_channel() {
        let mut state = AppState::new(&WizardConfig::default(), None, None, NoopDispatcher).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(VerificationResponse::parse("0|Bad password")).unwrap();
        tx.send(VerificationResponse::parse("1|Verified")).unwrap();

        assert_eq!(state.apply_replies(&mut rx), 2);
        assert!(state.controller.is_verified());
        assert_eq!(state.status_message(), "Verified");
        assert_eq!(state.apply_replies(&mut rx), 0);
    }
}

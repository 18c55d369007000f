// ABOUTME: UI tests for the wizard screen using headless rendering

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use setup_wizard::app::{AppState, EventHandler};
use setup_wizard::components::WizardScreen;
use setup_wizard::config::WizardConfig;
use setup_wizard::wizard::{NoopDispatcher, VerificationResponse};

pub struct UITestFramework {
    state: AppState<NoopDispatcher>,
    terminal: Terminal<TestBackend>,
    screen: WizardScreen,
}

impl UITestFramework {
    pub fn new() -> Self {
        Self::with_config(&WizardConfig::default())
    }

    pub fn with_config(config: &WizardConfig) -> Self {
        let backend = TestBackend::new(100, 32);
        let terminal = Terminal::new(backend).unwrap();
        let state = AppState::new(config, None, None, NoopDispatcher).unwrap();

        Self { state, terminal, screen: WizardScreen::new() }
    }

    pub fn press(&mut self, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(event) = EventHandler::handle_key_event(key, &self.state) {
            EventHandler::process_event(event, &mut self.state);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Render a frame and return the screen as text
    pub fn render(&mut self) -> String {
        let state = &self.state;
        let screen = &self.screen;
        self.terminal
            .draw(|frame| {
                let area = frame.size();
                screen.render(frame, area, state);
            })
            .unwrap();

        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn test_welcome_page_renders() {
    let mut ui = UITestFramework::new();
    let screen = ui.render();

    assert!(screen.contains("Server Setup Wizard"));
    assert!(screen.contains("Language"));
    assert!(screen.contains("< English >"));
    assert!(screen.contains("Next"));
    // No page before the first one
    assert!(!screen.contains("[PgUp]"));
}

#[test]
fn test_password_is_masked() {
    let mut ui = UITestFramework::new();
    ui.press(KeyCode::Enter);
    ui.type_text("me@example.com");
    ui.press(KeyCode::Tab);
    ui.type_text("secret");

    let screen = ui.render();
    assert!(screen.contains("me@example.com"));
    assert!(!screen.contains("secret"));
    assert!(screen.contains("••••••"));
    assert!(screen.contains("[PgUp]"));
}

#[test]
fn test_account_status_message_is_shown() {
    let mut ui = UITestFramework::new();
    ui.press(KeyCode::Enter);
    ui.state
        .controller
        .apply_verification(&VerificationResponse::parse("0|Invalid password"));

    let screen = ui.render();
    assert!(screen.contains("Invalid password"));
}

#[test]
fn test_hidden_pages_are_not_in_progress() {
    let mut ui = UITestFramework::new();
    let screen = ui.render();

    // The proxy page is disabled by default, so it never shows in the header
    assert!(!screen.contains("Proxy"));
}

#[test]
fn test_final_page_offers_finish() {
    let mut ui = UITestFramework::new();
    while !ui.state.controller.is_final_page() {
        ui.press(KeyCode::Enter);
    }

    let screen = ui.render();
    assert!(screen.contains("Finish"));
    assert!(screen.contains("Account not verified"));
}

#[test]
fn test_invalid_folder_is_flagged() {
    let mut ui = UITestFramework::new();
    while ui.state.controller.current_page().id != "audiodir" {
        ui.press(KeyCode::Enter);
    }
    ui.type_text("/definitely/not/a/real/folder");

    let screen = ui.render();
    assert!(screen.contains("Path does not exist"));
}

#[test]
fn test_labels_follow_language() {
    let mut config = WizardConfig::default();
    config.ui_preferences.language = "DE".to_string();

    let mut ui = UITestFramework::with_config(&config);
    let screen = ui.render();

    assert!(screen.contains("Weiter"));
    assert!(screen.contains("Sprache"));
}

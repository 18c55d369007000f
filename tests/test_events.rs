// ABOUTME: Tests for event handling to ensure keyboard inputs map to correct wizard actions

use std::cell::RefCell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use setup_wizard::app::{AppEvent, AppState, EventHandler, WizardOutcome};
use setup_wizard::config::WizardConfig;
use setup_wizard::wizard::{Credentials, NoopDispatcher, VerificationDispatcher, WizardView};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[derive(Default)]
struct RecordingDispatcher {
    sent: RefCell<Vec<Credentials>>,
}

impl VerificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, credentials: Credentials) {
        self.sent.borrow_mut().push(credentials);
    }
}

fn state() -> AppState<NoopDispatcher> {
    AppState::new(&WizardConfig::default(), None, None, NoopDispatcher).unwrap()
}

fn recording_state() -> AppState<RecordingDispatcher> {
    AppState::new(&WizardConfig::default(), None, None, RecordingDispatcher::default()).unwrap()
}

fn press<D: VerificationDispatcher>(state: &mut AppState<D>, key: KeyEvent) {
    if let Some(event) = EventHandler::handle_key_event(key, state) {
        EventHandler::process_event(event, state);
    }
}

fn type_text<D: VerificationDispatcher>(state: &mut AppState<D>, text: &str) {
    for c in text.chars() {
        press(state, create_key_event(KeyCode::Char(c)));
    }
}

#[test]
fn test_quit_key_events() {
    let state = state();

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state),
        Some(AppEvent::Quit)
    );
    assert_eq!(
        EventHandler::handle_key_event(
            create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &state
        ),
        Some(AppEvent::Quit)
    );
}

#[test]
fn test_page_navigation_key_events() {
    let state = state();

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Enter), &state),
        Some(AppEvent::NextPage)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::PageDown), &state),
        Some(AppEvent::NextPage)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::PageUp), &state),
        Some(AppEvent::PreviousPage)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Tab), &state),
        Some(AppEvent::FocusNext)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::BackTab), &state),
        Some(AppEvent::FocusPrevious)
    );
}

#[test]
fn test_characters_go_to_text_fields_only() {
    let mut state = state();

    // Welcome page focuses the language choice, so space toggles
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char(' ')), &state),
        Some(AppEvent::Toggle)
    );
    assert_eq!(EventHandler::handle_key_event(create_key_event(KeyCode::Char('x')), &state), None);

    press(&mut state, create_key_event(KeyCode::Enter));
    assert_eq!(state.controller.current_page().id, "sqn");
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char(' ')), &state),
        Some(AppEvent::InputChar(' '))
    );
}

#[test]
fn test_typing_and_backspace() {
    let mut state = state();
    press(&mut state, create_key_event(KeyCode::Enter));

    type_text(&mut state, "me@example.comm");
    press(&mut state, create_key_event(KeyCode::Backspace));

    assert_eq!(state.field("sn_email"), "me@example.com");
}

#[test]
fn test_leaving_account_page_dispatches_verification() {
    let mut state = recording_state();
    press(&mut state, create_key_event(KeyCode::Enter));
    assert_eq!(state.controller.current_page().id, "sqn");

    type_text(&mut state, "me@example.com");
    press(&mut state, create_key_event(KeyCode::Tab));
    type_text(&mut state, "hunter2");

    press(&mut state, create_key_event(KeyCode::Enter));
    assert_eq!(state.controller.current_page().id, "source");

    let sent = state.controller.dispatcher().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "me@example.com");
    assert_eq!(sent[0].password, "hunter2");
}

#[test]
fn test_leaving_account_page_backwards_dispatches_verification() {
    let mut state = recording_state();
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::PageUp));

    assert_eq!(state.controller.current_page().id, "welcome");
    assert_eq!(state.controller.dispatcher().sent.borrow().len(), 1);
}

#[test]
fn test_verify_now_only_on_account_page() {
    let mut state = recording_state();
    let verify = create_key_event_with_modifiers(KeyCode::Char('v'), KeyModifiers::CONTROL);

    press(&mut state, verify);
    assert!(state.controller.dispatcher().sent.borrow().is_empty());

    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, verify);
    assert_eq!(state.controller.dispatcher().sent.borrow().len(), 1);
    assert_eq!(state.controller.current_page().id, "sqn");
}

#[test]
fn test_space_toggles_checkbox_and_changes_route() {
    let mut state = state();
    press(&mut state, create_key_event(KeyCode::Enter)); // sqn
    press(&mut state, create_key_event(KeyCode::Enter)); // source
    assert_eq!(state.controller.current_page().id, "source");

    // useAudiodir starts checked; turn it off
    press(&mut state, create_key_event(KeyCode::Char(' ')));
    assert_eq!(state.controller.view().is_checked("useAudiodir"), Some(false));

    press(&mut state, create_key_event(KeyCode::Enter));
    assert_eq!(state.controller.current_page().id, "summary");
}

#[test]
fn test_language_toggle_requests_reload() {
    let mut state = state();
    press(&mut state, create_key_event(KeyCode::Char(' ')));

    assert_eq!(state.outcome, Some(WizardOutcome::LanguageChanged("DE".to_string())));
}

#[test]
fn test_enter_on_last_page_finishes() {
    let mut state = state();
    while !state.controller.is_final_page() {
        press(&mut state, create_key_event(KeyCode::Enter));
    }
    assert!(state.outcome.is_none());

    press(&mut state, create_key_event(KeyCode::Enter));
    match &state.outcome {
        Some(WizardOutcome::Finished(settings)) => {
            assert_eq!(settings.language.as_deref(), Some("EN"));
            assert!(!settings.account_verified);
        }
        other => panic!("expected finished outcome, got {other:?}"),
    }
}

#[test]
fn test_escape_cancels() {
    let mut state = state();
    press(&mut state, create_key_event(KeyCode::Esc));
    assert_eq!(state.outcome, Some(WizardOutcome::Cancelled));
}

#[test]
fn test_language_toggle_from_lowercase_config_code() {
    let mut config = WizardConfig::default();
    config.ui_preferences.language = "de".to_string();
    let mut state = AppState::new(&config, None, None, NoopDispatcher).unwrap();

    press(&mut state, create_key_event(KeyCode::Char(' ')));
    assert_eq!(state.outcome, Some(WizardOutcome::LanguageChanged("FR".to_string())));
}

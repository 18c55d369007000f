// ABOUTME: Event handling for keyboard input and wizard actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::app::state::{AppState, WizardOutcome};
use crate::wizard::page::{fields, ids};
use crate::wizard::{ControlKind, VerificationDispatcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    NextPage,
    PreviousPage,
    FocusNext,
    FocusPrevious,
    /// Flip the focused checkbox or cycle the focused choice
    Toggle,
    InputChar(char),
    Backspace,
    VerifyNow,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event<D: VerificationDispatcher>(key: KeyEvent, state: &AppState<D>) -> Option<AppEvent> {
        let text_focus = state.focused_control().is_some_and(|c| c.accepts_text());

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppEvent::Quit),
            KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppEvent::VerifyNow),
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Enter | KeyCode::PageDown => Some(AppEvent::NextPage),
            KeyCode::PageUp => Some(AppEvent::PreviousPage),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::FocusPrevious),
            KeyCode::Backspace if text_focus => Some(AppEvent::Backspace),
            KeyCode::Char(c) if text_focus => Some(AppEvent::InputChar(c)),
            KeyCode::Char(' ') | KeyCode::Right => Some(AppEvent::Toggle),
            _ => None,
        }
    }

    pub fn process_event<D: VerificationDispatcher>(event: AppEvent, state: &mut AppState<D>) {
        match event {
            AppEvent::Quit => {
                info!("Wizard cancelled on page {}", state.controller.current_page().id);
                state.outcome = Some(WizardOutcome::Cancelled);
            }
            AppEvent::NextPage => {
                if state.controller.is_final_page() {
                    info!("Wizard finished");
                    state.outcome = Some(WizardOutcome::Finished(state.controller.finish()));
                } else {
                    state.controller.next();
                    state.reset_focus();
                }
            }
            AppEvent::PreviousPage => {
                state.controller.previous();
                state.reset_focus();
            }
            AppEvent::FocusNext => state.focus_next(),
            AppEvent::FocusPrevious => state.focus_previous(),
            AppEvent::Toggle => Self::toggle_focused(state),
            AppEvent::InputChar(c) => {
                if let Some(id) = Self::focused_text_id(state) {
                    state.controller.view_mut().push_char(&id, c);
                }
            }
            AppEvent::Backspace => {
                if let Some(id) = Self::focused_text_id(state) {
                    state.controller.view_mut().pop_char(&id);
                }
            }
            AppEvent::VerifyNow => {
                if state.controller.current_page().id == ids::SQN {
                    state.controller.trigger_verification();
                }
            }
        }
    }

    fn focused_text_id<D: VerificationDispatcher>(state: &AppState<D>) -> Option<String> {
        state
            .focused_control()
            .filter(|c| c.accepts_text())
            .map(|c| c.id.clone())
    }

    fn toggle_focused<D: VerificationDispatcher>(state: &mut AppState<D>) {
        let Some(control) = state.focused_control().cloned() else {
            return;
        };

        match &control.kind {
            ControlKind::Checkbox { .. } => {
                state.controller.view_mut().toggle(&control.id);
            }
            ControlKind::Choice(options) if !options.is_empty() => {
                let current = state.field(&control.id);
                let position = options.iter().position(|(value, _)| *value == current);
                let next = position.map_or(0, |p| (p + 1) % options.len());
                let value = options[next].0.clone();
                state.controller.view_mut().set_field(&control.id, &value);

                // The language selector submits immediately
                if control.id == fields::LANGUAGE {
                    info!("Language changed to {}", value);
                    state.outcome = Some(WizardOutcome::LanguageChanged(value));
                }
            }
            _ => {}
        }
    }
}

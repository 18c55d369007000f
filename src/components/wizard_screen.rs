// ABOUTME: Wizard screen component
// Renders the current page, its controls, and step progress in the terminal

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::wizard::page::{fields, ids};
use crate::wizard::{ControlKind, ValidatedPath, VerificationDispatcher, WizardView};

// Color palette
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

pub struct WizardScreen;

impl WizardScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn render<D: VerificationDispatcher>(&self, frame: &mut Frame, area: Rect, state: &AppState<D>) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header with progress
                Constraint::Min(10),   // Page content
                Constraint::Length(3), // Navigation footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_page(frame, layout[1], state);
        self.render_navigation(frame, layout[2], state);
    }

    fn render_header<D: VerificationDispatcher>(&self, frame: &mut Frame, area: Rect, state: &AppState<D>) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            state.strings.get("wizard_title"),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        // Progress over the pages that currently take part in navigation
        let current = &state.controller.current_page().id;
        let visible = state.controller.visible_pages();
        let current_pos = visible.iter().position(|p| &p.id == current).unwrap_or(0);

        let mut spans = Vec::new();
        for (idx, page) in visible.iter().enumerate() {
            let (icon, style) = if idx < current_pos {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_pos {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };
            spans.push(Span::styled(icon, style));
            if idx == current_pos {
                spans.push(Span::styled(
                    format!(" {}", state.strings.page_title(&page.id)),
                    Style::default().fg(SOFT_WHITE),
                ));
            }
            if idx + 1 < visible.len() {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), rows[1]);
    }

    fn render_page<D: VerificationDispatcher>(&self, frame: &mut Frame, area: Rect, state: &AppState<D>) {
        let page = state.controller.current_page();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", state.strings.page_title(&page.id)))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        if let Some(intro) = state.strings.page_intro(&page.id) {
            lines.push(Line::from(Span::styled(intro, Style::default().fg(MUTED_GRAY))));
            lines.push(Line::from(""));
        }

        for (idx, control) in page.controls.iter().enumerate() {
            lines.extend(self.control_lines(state, idx, control));
        }

        if page.id == ids::SQN {
            lines.extend(self.account_status_lines(state));
        } else if page.id == ids::SUMMARY {
            lines.extend(self.summary_lines(state));
        }

        let body = Paragraph::new(lines).wrap(Wrap { trim: false });
        let padded = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1)])
            .split(inner);
        frame.render_widget(body, padded[0]);
    }

    fn control_lines<D: VerificationDispatcher>(
        &self,
        state: &AppState<D>,
        idx: usize,
        control: &crate::wizard::Control,
    ) -> Vec<Line<'static>> {
        let focused = idx == state.focus;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE)
        };
        let label = state.strings.get(&control.id).to_string();
        let view = state.controller.view();
        let cursor = if focused && state.show_cursor { "│" } else { "" };

        let mut lines = Vec::new();
        match &control.kind {
            ControlKind::Checkbox { .. } => {
                let checked = view.is_checked(&control.id).unwrap_or(false);
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(
                        if checked { "[x] " } else { "[ ] " },
                        Style::default().fg(if checked { SELECTION_GREEN } else { MUTED_GRAY }),
                    ),
                    Span::styled(label, label_style),
                ]));
            }
            ControlKind::Choice(options) => {
                let value = state.field(&control.id);
                let display = options
                    .iter()
                    .find(|(v, _)| *v == value)
                    .map_or(value.clone(), |(_, name)| name.clone());
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(format!("< {display} >"), Style::default().fg(SOFT_WHITE)),
                ]));
            }
            ControlKind::Text => {
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(format!("{}{cursor}", state.field(&control.id)), Style::default().fg(SOFT_WHITE)),
                ]));
            }
            ControlKind::Password => {
                let masked = "•".repeat(state.field(&control.id).chars().count());
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(format!("{masked}{cursor}"), Style::default().fg(SOFT_WHITE)),
                ]));
            }
            ControlKind::Path(filter) => {
                let value = state.field(&control.id);
                let selector_style = if view.selector_active(&control.id) {
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(format!("{label} ({}): ", filter.hint()), label_style),
                    Span::styled(format!("{value}{cursor}"), selector_style),
                ]));

                if !value.trim().is_empty() {
                    let validated = ValidatedPath::validate(&value, filter);
                    let line = match validated.error {
                        Some(error) => Line::from(Span::styled(format!("    ✗ {error}"), Style::default().fg(ERROR_RED))),
                        None => Line::from(Span::styled(
                            format!("    ✓ {}", validated.expanded_path.display()),
                            Style::default().fg(SELECTION_GREEN),
                        )),
                    };
                    lines.push(line);
                }
            }
        }
        lines
    }

    fn account_status_lines<D: VerificationDispatcher>(&self, state: &AppState<D>) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        let message = state.status_message();
        if !message.is_empty() {
            let color = if state.controller.is_verified() { SELECTION_GREEN } else { WARNING_YELLOW };
            lines.push(Line::from(Span::styled(message.to_string(), Style::default().fg(color))));
        }

        lines.push(Line::from(vec![
            Span::styled("Ctrl+V", Style::default().fg(GOLD)),
            Span::styled(format!(" {}", state.strings.get("verify")), Style::default().fg(MUTED_GRAY)),
        ]));
        lines
    }

    fn summary_lines<D: VerificationDispatcher>(&self, state: &AppState<D>) -> Vec<Line<'static>> {
        let settings = state.controller.finish();
        let mut lines = Vec::new();

        let (icon, color, key) = if settings.account_verified {
            ("✓", SELECTION_GREEN, "account_verified")
        } else {
            ("○", WARNING_YELLOW, "account_unverified")
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {icon} "), Style::default().fg(color)),
            Span::styled(state.strings.get(key).to_string(), Style::default().fg(SOFT_WHITE)),
        ]));

        for page in state.controller.visible_pages() {
            for control in &page.controls {
                if control.id == fields::SN_PASSWORD || control.id == fields::LANGUAGE {
                    continue;
                }
                let value = match control.kind {
                    ControlKind::Checkbox { .. } => {
                        if settings.is_checked(&control.id) { "✓".to_string() } else { "-".to_string() }
                    }
                    _ => settings.field(&control.id).unwrap_or_default().to_string(),
                };
                if value.is_empty() {
                    continue;
                }
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(GOLD)),
                    Span::styled(format!("{}: ", state.strings.get(&control.id)), Style::default().fg(SOFT_WHITE)),
                    Span::styled(value, Style::default().fg(MUTED_GRAY)),
                ]));
            }
        }
        lines
    }

    fn render_navigation<D: VerificationDispatcher>(&self, frame: &mut Frame, area: Rect, state: &AppState<D>) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = vec![Span::styled("  ", Style::default())];

        if state.controller.can_go_back() {
            spans.push(Span::styled("[PgUp]", Style::default().fg(GOLD)));
            spans.push(Span::styled(format!(" {}", state.strings.get("previous")), Style::default().fg(MUTED_GRAY)));
            spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
        }

        let next_label = if state.controller.is_final_page() { "finish" } else { "next" };
        spans.push(Span::styled("[Enter]", Style::default().fg(GOLD)));
        spans.push(Span::styled(format!(" {}", state.strings.get(next_label)), Style::default().fg(SOFT_WHITE)));

        spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("[Esc]", Style::default().fg(GOLD)));
        spans.push(Span::styled(format!(" {}", state.strings.get("cancel")), Style::default().fg(MUTED_GRAY)));

        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), inner);
    }
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

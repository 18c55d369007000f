// ABOUTME: Main entry point for the setup wizard with TUI and CLI support
//
// Binary: setup-wizard
// Usage: setup-wizard [COMMAND]
// - No command: launches the wizard
// - verify: check account credentials against the server
// - pages: show which pages the wizard would visit
// - status: show the saved setup
// - reset: forget the saved setup

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};
use tracing::{info, warn};

mod cli;

use setup_wizard::app::{App, EventHandler, WizardOutcome};
use setup_wizard::components::WizardScreen;
use setup_wizard::config::{SetupRecord, WizardConfig};
use setup_wizard::credentials;
use setup_wizard::wizard::WizardSettings;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let mut config = WizardConfig::load()?;
    cli::apply_server_override(&mut config, args.server_url.as_deref());

    let result = match args.command {
        Some(cli::Commands::Verify(verify_args)) => cli::verify::execute(verify_args, &config, args.format).await,
        Some(cli::Commands::Pages(pages_args)) => cli::pages::execute(pages_args, &config, args.format),
        Some(cli::Commands::Status) => cli::status::execute(&config, args.format),
        Some(cli::Commands::Reset(reset_args)) => cli::status::reset(reset_args),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui(features)) => run_tui(config, &features).await,
        None => run_tui(config, &cli::FeatureArgs::default()).await,
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(config: WizardConfig, features: &cli::FeatureArgs) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_wizard(config, features, &mut terminal).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

/// Run wizard sessions until the user finishes or cancels.
/// A language change persists the choice and starts a fresh session from the first page.
async fn run_wizard(
    mut config: WizardConfig,
    features: &cli::FeatureArgs,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    config.features = features.apply(config.features);

    loop {
        let previous = match SetupRecord::load() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Ignoring unreadable setup record: {:#}", e);
                None
            }
        };
        let password = credentials::account_password();

        let mut app = App::new(&config, previous.as_ref(), password)?;

        match run_tui_loop(&mut app, terminal).await? {
            WizardOutcome::Finished(settings) => {
                save_settings(settings)?;
                return Ok(());
            }
            WizardOutcome::LanguageChanged(code) => {
                config.set_language(&code);
                WizardConfig::save_language(&code).context("Failed to save language preference")?;
                info!("Reloading wizard in {}", config.ui_preferences.language);
            }
            WizardOutcome::Cancelled => return Ok(()),
        }
    }
}

async fn run_tui_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<WizardOutcome> {
    let screen = WizardScreen::new();
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    // Flush any pending terminal events so stray keypresses don't skip pages
    while crossterm::event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = crossterm::event::read();
    }

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            screen.render(frame, area, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            app.state.toggle_cursor();
            last_tick = Instant::now();
        }

        if let Some(outcome) = app.state.outcome.take() {
            return Ok(outcome);
        }
    }
}

/// Persist finished settings; the account password goes to the keychain, never to disk
fn save_settings(settings: WizardSettings) -> Result<()> {
    let (record, password) = SetupRecord::from_settings(settings);
    record.save().context("Failed to save setup")?;
    info!("Setup saved (account verified: {})", record.account_verified);

    if let Some(password) = password {
        if let Err(e) = credentials::store_account_password(&password) {
            warn!("Could not store account password: {:#}", e);
        }
    }
    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Create log directory if it doesn't exist
    let log_dir = WizardConfig::base_dir()
        .map(|base| base.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".setup-wizard/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "setup-wizard-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .expect("Failed to create log file");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "setup_wizard=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}

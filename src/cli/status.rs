// ABOUTME: CLI status and reset commands for the saved setup
//
// status: Show the saved setup record (text/JSON output)
// reset: Remove the setup record and stored password, with confirmation prompt

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use super::{OutputFormat, ResetArgs};
use setup_wizard::config::{SetupRecord, WizardConfig};
use setup_wizard::credentials;

/// JSON output structure for the status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub record_path: String,
    pub server_url: String,
    pub completed: bool,
    pub completed_at: Option<String>,
    pub needs_setup: bool,
    pub language: Option<String>,
    pub account_verified: bool,
    pub fields: BTreeMap<String, String>,
    pub checkboxes: BTreeMap<String, bool>,
}

impl StatusOutput {
    pub fn new(record_path: &Path, config: &WizardConfig, record: &SetupRecord) -> Self {
        Self {
            record_path: record_path.display().to_string(),
            server_url: config.server.url.clone(),
            completed: record.completed,
            completed_at: record.completed_at.clone(),
            needs_setup: record.needs_setup(),
            language: record.language.clone(),
            account_verified: record.account_verified,
            fields: record.fields.clone(),
            checkboxes: record.checkboxes.clone(),
        }
    }
}

/// Execute the status command
pub fn execute(config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let path = SetupRecord::record_path()?;
    let record = SetupRecord::load_from(&path)?;
    let output = StatusOutput::new(&path, config, &record);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize status")?
            );
        }
        OutputFormat::Text => {
            let status_text = if !output.completed {
                "\x1b[31m●\x1b[0m Not completed"
            } else if output.needs_setup {
                "\x1b[33m●\x1b[0m Completed by an older version"
            } else {
                "\x1b[32m●\x1b[0m Completed"
            };

            println!("Setup: {}", output.record_path);
            println!("{}", "━".repeat(44));
            println!("Status:       {status_text}");
            println!("Server:       {}", output.server_url);
            if let Some(completed_at) = &output.completed_at {
                println!("Completed:    {completed_at}");
            }
            if let Some(language) = &output.language {
                println!("Language:     {language}");
            }
            println!("Account:      {}", if output.account_verified { "verified" } else { "not verified" });

            if !output.fields.is_empty() || !output.checkboxes.is_empty() {
                println!();
                println!("Settings:");
                for (id, value) in &output.fields {
                    println!("  {id:<14}{value}");
                }
                for (id, checked) in &output.checkboxes {
                    println!("  {id:<14}{}", if *checked { "on" } else { "off" });
                }
            }

            if output.needs_setup {
                println!();
                println!("Run: setup-wizard");
            }
        }
    }

    Ok(())
}

/// Execute the reset command
pub fn reset(args: ResetArgs) -> Result<()> {
    let path = SetupRecord::record_path()?;

    // Prompt for confirmation unless --force
    if !args.force {
        print!("Forget saved setup at '{}'? [y/N] ", path.display());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    SetupRecord::remove_at(&path)?;
    println!("Setup record removed.");

    match credentials::forget_account_password() {
        Ok(true) => println!("Stored password removed."),
        Ok(false) => {}
        Err(e) => eprintln!("Warning: could not remove stored password: {e:#}"),
    }

    Ok(())
}

// ABOUTME: CLI verify command
// Sends account credentials to the server and reports the status it returns

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use super::{OutputFormat, VerifyArgs};
use setup_wizard::config::WizardConfig;
use setup_wizard::credentials;
use setup_wizard::wizard::{Credentials, VerificationResponse, VerifyClient};

/// JSON output structure for the verify command
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub endpoint: String,
    pub verified: bool,
    pub status: String,
    pub message: String,
}

impl VerifyOutput {
    fn new(endpoint: &str, response: &VerificationResponse) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            verified: response.is_verified(),
            status: response.status.clone(),
            message: response.message.clone(),
        }
    }
}

/// Execute the verify command
///
/// Unlike the wizard, which never surfaces verification failures, this reports
/// them and exits non-zero so it can be scripted.
pub async fn execute(args: VerifyArgs, config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => credentials::account_password()
            .ok_or_else(|| anyhow!("No password given and none stored. Pass --password."))?,
    };

    let client = VerifyClient::new(&config.server.url)
        .with_context(|| format!("Invalid server URL: {}", config.server.url))?;
    let endpoint = client.endpoint().to_string();

    let response = client
        .verify(&Credentials { email: args.email, password })
        .await
        .with_context(|| format!("Verification request to {endpoint} failed"))?;

    let output = VerifyOutput::new(&endpoint, &response);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize verification result")?
            );
        }
        OutputFormat::Text => {
            let marker = if output.verified { "\x1b[32m●\x1b[0m" } else { "\x1b[31m●\x1b[0m" };
            println!("{marker} {}", if output.message.is_empty() { &output.status } else { &output.message });
        }
    }

    if !output.verified {
        bail!("Account not verified (status {:?})", output.status);
    }
    Ok(())
}

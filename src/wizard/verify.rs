// ABOUTME: Online account verification for the wizard's account page
// Posts the credentials as a form, parses the `status|message` reply, and delivers
// results back to the UI task over a channel without waiting on them

use std::fmt;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use super::page::fields;

/// Endpoint relative to the server URL
pub const VERIFY_PATH: &str = "/settings/server/squeezenetwork.html";

/// Status value the server sends for a valid account
pub const STATUS_VERIFIED: &str = "1";

/// Errors from a single verification request
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Server URL could not be parsed or joined
    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(#[from] url::ParseError),

    /// Transport failure or unreadable body
    #[error("Verification request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Verification endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

/// Account credentials read from the account page
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parsed `status|message` reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResponse {
    pub status: String,
    pub message: String,
}

impl VerificationResponse {
    /// Split on `|`; the first part is the status, the second the message.
    /// Any further parts are dropped and a missing message is empty.
    pub fn parse(body: &str) -> Self {
        let mut parts = body.split('|');
        let status = parts.next().unwrap_or_default().to_string();
        let message = parts.next().unwrap_or_default().trim_end().to_string();
        Self { status, message }
    }

    pub fn is_verified(&self) -> bool {
        self.status == STATUS_VERIFIED
    }
}

/// HTTP client for the verification endpoint
#[derive(Debug, Clone)]
pub struct VerifyClient {
    client: Client,
    endpoint: Url,
}

impl VerifyClient {
    pub fn new(server_url: &str) -> Result<Self, VerifyError> {
        let endpoint = Url::parse(server_url)?.join(VERIFY_PATH)?;

        // No timeout: a slow server's reply is still applied when it lands.
        let client = Client::builder()
            .user_agent(concat!("setup-wizard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one verification request and parse the reply
    pub async fn verify(&self, credentials: &Credentials) -> Result<VerificationResponse, VerifyError> {
        debug!("Verifying account {} against {}", credentials.email, self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[
                (fields::SN_EMAIL, credentials.email.as_str()),
                (fields::SN_PASSWORD, credentials.password.as_str()),
                ("saveSettings", "1"),
                ("AJAX", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VerifyError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text().await?;
        let parsed = VerificationResponse::parse(&body);
        info!(
            "Account verification for {} returned status {:?}",
            credentials.email, parsed.status
        );
        Ok(parsed)
    }
}

/// Starts a verification without waiting for it
pub trait VerificationDispatcher {
    fn dispatch(&self, credentials: Credentials);
}

/// Dispatcher that drops every request; used where no server is reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl VerificationDispatcher for NoopDispatcher {
    fn dispatch(&self, credentials: Credentials) {
        debug!("Dropping verification for {}", credentials.email);
    }
}

/// Spawns each request on the tokio runtime and sends successful replies on a channel.
/// Failed requests are logged and produce nothing.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: VerifyClient,
    results: mpsc::UnboundedSender<VerificationResponse>,
}

impl HttpVerifier {
    /// Create a verifier and the receiver its replies arrive on
    pub fn channel(client: VerifyClient) -> (Self, mpsc::UnboundedReceiver<VerificationResponse>) {
        let (results, receiver) = mpsc::unbounded_channel();
        (Self { client, results }, receiver)
    }
}

impl VerificationDispatcher for HttpVerifier {
    fn dispatch(&self, credentials: Credentials) {
        let client = self.client.clone();
        let results = self.results.clone();

        tokio::spawn(async move {
            match client.verify(&credentials).await {
                Ok(response) => {
                    if results.send(response).is_err() {
                        debug!("Verification reply arrived after the wizard closed");
                    }
                }
                Err(e) => warn!("Account verification failed: {}", e),
            }
        });
    }
}

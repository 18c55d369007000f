// ABOUTME: Account password storage in the system keychain
// The password is kept out of the setup record; the keyring crate picks the platform store

use anyhow::{anyhow, Context, Result};
use keyring::Entry;
use tracing::{debug, info, warn};

const SERVICE_NAME: &str = "setup-wizard";

/// Secrets the wizard keeps in the keychain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    AccountPassword,
}

impl CredentialKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountPassword => "account_password",
        }
    }

    fn entry(self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, self.as_str())
            .with_context(|| format!("Failed to open keychain entry {}", self.as_str()))
    }
}

/// Map "nothing stored" to `None`; every other keychain failure is an error
fn absent_as_none<T>(key: CredentialKey, result: keyring::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => {
            debug!("Nothing stored for {}", key.as_str());
            Ok(None)
        }
        Err(e) => Err(anyhow!("Keychain access for {} failed: {}", key.as_str(), e)),
    }
}

pub fn store_account_password(password: &str) -> Result<()> {
    let key = CredentialKey::AccountPassword;
    key.entry()?
        .set_password(password)
        .with_context(|| format!("Failed to store {} in keychain", key.as_str()))?;
    info!("Stored {}", key.as_str());
    Ok(())
}

/// Stored account password. An unreadable keychain counts as nothing stored, since
/// the wizard can always ask again.
pub fn account_password() -> Option<String> {
    let key = CredentialKey::AccountPassword;
    match key.entry().and_then(|entry| absent_as_none(key, entry.get_password())) {
        Ok(password) => password,
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}

/// Remove the stored account password; true if one was there
pub fn forget_account_password() -> Result<bool> {
    let key = CredentialKey::AccountPassword;
    let removed = absent_as_none(key, key.entry()?.delete_credential())?.is_some();
    if removed {
        info!("Removed {}", key.as_str());
    }
    Ok(removed)
}

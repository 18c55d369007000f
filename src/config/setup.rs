// ABOUTME: Setup record persistence
// Written when the wizard finishes; holds the submitted settings minus secrets

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::WizardConfig;
use crate::wizard::page::fields;
use crate::wizard::WizardSettings;

/// Finished setup persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupRecord {
    /// Whether the wizard has been completed
    #[serde(default)]
    pub completed: bool,

    /// When the wizard was completed (RFC 3339 timestamp)
    #[serde(default)]
    pub completed_at: Option<String>,

    /// Version of the wizard that wrote this record
    #[serde(default = "default_version")]
    pub version: String,

    /// Interface language chosen during setup
    #[serde(default)]
    pub language: Option<String>,

    /// Whether the online account was verified before finishing
    #[serde(default)]
    pub account_verified: bool,

    /// Text and path fields, passwords excluded
    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    /// Checkbox states
    #[serde(default)]
    pub checkboxes: BTreeMap<String, bool>,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for SetupRecord {
    fn default() -> Self {
        Self {
            completed: false,
            completed_at: None,
            version: default_version(),
            language: None,
            account_verified: false,
            fields: BTreeMap::new(),
            checkboxes: BTreeMap::new(),
        }
    }
}

impl SetupRecord {
    /// Build a completed record; the account password is handed back separately
    pub fn from_settings(mut settings: WizardSettings) -> (Self, Option<String>) {
        let password = settings.take_secret(fields::SN_PASSWORD);

        let mut record = Self {
            language: settings.language,
            account_verified: settings.account_verified,
            fields: settings.fields,
            checkboxes: settings.checkboxes,
            ..Self::default()
        };
        record.mark_completed();

        (record, password)
    }

    /// Get the path to the setup record
    pub fn record_path() -> Result<PathBuf> {
        Ok(WizardConfig::base_dir()?.join("config").join("setup.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::record_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read setup record from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse setup record from {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::record_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize setup record")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write setup record to {}", path.display()))?;

        Ok(())
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.completed_at = Some(Utc::now().to_rfc3339());
        self.version = default_version();
    }

    /// True if never completed or the major version changed since
    pub fn needs_setup(&self) -> bool {
        if !self.completed {
            return true;
        }

        let current_major = env!("CARGO_PKG_VERSION").split('.').next().unwrap_or("0");
        let saved_major = self.version.split('.').next().unwrap_or("0");

        current_major != saved_major
    }

    /// Remove the record from disk, if present
    pub fn remove_at(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

// ABOUTME: Configuration management for the setup wizard
// Handles the server location, feature flags, and UI language, layered from system,
// user, and project config files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::wizard::strings::{self, DEFAULT_LANGUAGE};
use crate::wizard::FeatureFlags;

pub mod setup;

pub use setup::SetupRecord;

/// Environment variable that overrides the configured server URL
pub const SERVER_URL_ENV: &str = "SETUP_WIZARD_SERVER_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Server the wizard configures
    #[serde(default)]
    pub server: ServerConfig,

    /// Server capabilities that gate optional pages
    #[serde(default)]
    pub features: FeatureFlags,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server, e.g. http://localhost:9000
    #[serde(default = "default_server_url")]
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { url: default_server_url() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Interface language code
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self { language: default_language() }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_server_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// One config file as written; only the keys it contains take part in the merge
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    server: ServerLayer,
    #[serde(default)]
    features: FeaturesLayer,
    #[serde(default)]
    ui_preferences: UiLayer,
}

#[derive(Debug, Default, Deserialize)]
struct ServerLayer {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FeaturesLayer {
    show_proxy: Option<bool>,
    show_itunes: Option<bool>,
    show_musicip: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct UiLayer {
    language: Option<String>,
}

impl WizardConfig {
    /// Load configuration from default locations, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.apply_env(std::env::var(SERVER_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load and merge the given files; later files take precedence
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            if path.exists() {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;

                let layer: ConfigLayer = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config from {}", path.display()))?;

                config.merge(layer);
            }
        }

        Ok(config)
    }

    /// Write a language choice into the user config file only.
    ///
    /// Other keys in that file are kept as they are; values from system or project
    /// files, the environment, and the command line are not copied in.
    pub fn save_language(code: &str) -> Result<()> {
        Self::save_language_to(&Self::get_user_config_dir()?.join("config.toml"), code)
    }

    pub fn save_language_to(path: &Path, code: &str) -> Result<()> {
        let mut table = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            content
                .parse::<toml::Table>()
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            toml::Table::new()
        };

        let mut normalized = Self::default();
        normalized.set_language(code);

        let prefs = table
            .entry("ui_preferences")
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(prefs) = prefs else {
            anyhow::bail!("[ui_preferences] in {} is not a table", path.display());
        };
        prefs.insert(
            "language".to_string(),
            toml::Value::String(normalized.ui_preferences.language),
        );

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(&table).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Reject a server URL the verification client could not use
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.server.url)
            .with_context(|| format!("Invalid server URL: {}", self.server.url))?;
        Ok(())
    }

    /// Configuration file paths, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/setup-wizard/config.toml")];

        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".setup-wizard").join("config.toml"));
        }

        paths
    }

    /// Base directory for config, setup record, and logs
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".setup-wizard"))
    }

    fn get_user_config_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config"))
    }

    /// Apply one file's values; anything the file sets overrides earlier layers
    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(url) = layer.server.url {
            self.server.url = url;
        }

        let features = layer.features;
        if let Some(show) = features.show_proxy {
            self.features.show_proxy = show;
        }
        if let Some(show) = features.show_itunes {
            self.features.show_itunes = show;
        }
        if let Some(show) = features.show_musicip {
            self.features.show_musicip = show;
        }

        if let Some(language) = layer.ui_preferences.language {
            self.set_language(&language);
        }
    }

    fn apply_env(&mut self, server_url: Option<String>) {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Server URL overridden from {}", SERVER_URL_ENV);
            self.server.url = url;
        }
    }

    /// Record a language change; unsupported codes fall back to the default
    pub fn set_language(&mut self, code: &str) {
        self.ui_preferences.language = if strings::is_supported(code) {
            code.to_ascii_uppercase()
        } else {
            default_language()
        };
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            features: FeatureFlags::default(),
            ui_preferences: UiPreferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = WizardConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.server.url, "http://localhost:9000");
        assert_eq!(config.ui_preferences.language, "EN");
        assert!(!config.features.show_proxy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[features]\nshow_proxy = true\n").unwrap();

        let config = WizardConfig::load_from_paths(&[path]).unwrap();
        assert!(config.features.show_proxy);
        assert!(config.features.show_itunes);
        assert_eq!(config.server.url, "http://localhost:9000");
    }

    #[test]
    fn test_later_file_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        fs::write(&system, "[server]\nurl = \"http://music.local:9000\"\n[ui_preferences]\nlanguage = \"DE\"\n").unwrap();
        fs::write(&user, "[ui_preferences]\nlanguage = \"FR\"\n").unwrap();

        let config = WizardConfig::load_from_paths(&[system, user, dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.server.url, "http://music.local:9000");
        assert_eq!(config.ui_preferences.language, "FR");
    }

    #[test]
    fn test_file_without_features_keeps_earlier_flags() {
        let dir = TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        fs::write(&system, "[features]\nshow_proxy = true\n").unwrap();
        fs::write(&user, "[ui_preferences]\nlanguage = \"NL\"\n").unwrap();

        let config = WizardConfig::load_from_paths(&[system, user]).unwrap();
        assert!(config.features.show_proxy);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[server\nurl = ").unwrap();

        let err = WizardConfig::load_from_paths(&[path]).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_env_override_and_validation() {
        let mut config = WizardConfig::default();
        config.apply_env(Some("http://10.0.0.2:9000".to_string()));
        assert_eq!(config.server.url, "http://10.0.0.2:9000");

        config.apply_env(Some("  ".to_string()));
        assert_eq!(config.server.url, "http://10.0.0.2:9000");

        config.server.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_user_choice_of_default_language_wins() {
        let dir = TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user").join("config.toml");
        fs::write(&system, "[ui_preferences]\nlanguage = \"DE\"\n").unwrap();

        WizardConfig::save_language_to(&user, "EN").unwrap();

        let config = WizardConfig::load_from_paths(&[system, user]).unwrap();
        assert_eq!(config.ui_preferences.language, "EN");
    }

    #[test]
    fn test_partial_feature_tables_merge_per_flag() {
        let dir = TempDir::new().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        fs::write(&system, "[features]\nshow_proxy = true\n").unwrap();
        fs::write(&user, "[features]\nshow_itunes = false\n").unwrap();

        let config = WizardConfig::load_from_paths(&[system, user]).unwrap();
        assert_eq!(
            config.features,
            FeatureFlags { show_proxy: true, show_itunes: false, show_musicip: true }
        );
    }

    #[test]
    fn test_lowercase_language_is_normalized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui_preferences]\nlanguage = \"de\"\n").unwrap();

        let config = WizardConfig::load_from_paths(&[path]).unwrap();
        assert_eq!(config.ui_preferences.language, "DE");
    }

    #[test]
    fn test_save_language_only_touches_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[features]\nshow_musicip = false\n").unwrap();

        // Overrides held in memory never reach the file
        let mut config = WizardConfig::load_from_paths(&[path.clone()]).unwrap();
        config.apply_env(Some("http://temp-override:9000".to_string()));

        WizardConfig::save_language_to(&path, "nl").unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("temp-override"));
        assert!(!saved.contains("[server]"));

        let loaded = WizardConfig::load_from_paths(&[path]).unwrap();
        assert_eq!(loaded.ui_preferences.language, "NL");
        assert!(!loaded.features.show_musicip);
        assert_eq!(loaded.server.url, "http://localhost:9000");
    }

    #[test]
    fn test_set_unsupported_language() {
        let mut config = WizardConfig::default();
        config.set_language("XX");
        assert_eq!(config.ui_preferences.language, "EN");
    }
}

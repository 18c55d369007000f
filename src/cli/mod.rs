// ABOUTME: CLI argument parsing and command routing for setup-wizard
//
// Provides command-line interface for:
// - Running the wizard (tui, default)
// - Checking account credentials against the server (verify)
// - Previewing which pages a given setup would show (pages)
// - Inspecting or clearing the saved setup (status, reset)

pub mod pages;
pub mod status;
pub mod verify;

use clap::{Parser, Subcommand, ValueEnum};

use setup_wizard::config::WizardConfig;
use setup_wizard::wizard::FeatureFlags;

/// Step-by-step server setup in the terminal
#[derive(Parser)]
#[command(name = "setup-wizard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Server base URL, overrides config and environment
    #[arg(long, global = true)]
    pub server_url: Option<String>,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the wizard (default if no command given)
    Tui(FeatureArgs),

    /// Verify account credentials against the server
    Verify(VerifyArgs),

    /// Show which pages the wizard would visit
    Pages(PagesArgs),

    /// Show the saved setup
    Status,

    /// Forget the saved setup and stored password
    Reset(ResetArgs),
}

/// Feature flag overrides shared by commands that build the page list
#[derive(clap::Args, Default, Clone)]
pub struct FeatureArgs {
    /// Show the proxy page
    #[arg(long)]
    pub show_proxy: bool,

    /// Hide the iTunes page
    #[arg(long)]
    pub hide_itunes: bool,

    /// Hide the MusicIP page
    #[arg(long)]
    pub hide_musicip: bool,
}

impl FeatureArgs {
    /// Apply overrides on top of configured flags
    pub fn apply(&self, mut flags: FeatureFlags) -> FeatureFlags {
        if self.show_proxy {
            flags.show_proxy = true;
        }
        if self.hide_itunes {
            flags.show_itunes = false;
        }
        if self.hide_musicip {
            flags.show_musicip = false;
        }
        flags
    }
}

/// Arguments for the verify command
#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Account email address
    #[arg(long, short)]
    pub email: String,

    /// Account password; falls back to the stored password
    #[arg(long, short)]
    pub password: Option<String>,
}

/// Arguments for the pages command
#[derive(clap::Args)]
pub struct PagesArgs {
    #[command(flatten)]
    pub features: FeatureArgs,

    /// Checkbox to mark checked (repeatable), e.g. --check itunes
    #[arg(long = "check")]
    pub checked: Vec<String>,
}

/// Arguments for the reset command
#[derive(clap::Args)]
pub struct ResetArgs {
    /// Reset without confirmation
    #[arg(long, short)]
    pub force: bool,
}

/// Apply the global `--server-url` override
pub fn apply_server_override(config: &mut WizardConfig, server_url: Option<&str>) {
    if let Some(url) = server_url {
        config.server.url = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["setup-wizard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.server_url.is_none());
    }

    #[test]
    fn test_pages_args_parse() {
        let cli = Cli::try_parse_from([
            "setup-wizard",
            "pages",
            "--show-proxy",
            "--check",
            "itunes",
            "--check",
            "useAudiodir",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Pages(args)) => {
                assert!(args.features.show_proxy);
                assert_eq!(args.checked, vec!["itunes", "useAudiodir"]);
            }
            _ => panic!("expected pages command"),
        }
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_feature_args_override_flags() {
        let args = FeatureArgs { show_proxy: true, hide_itunes: true, hide_musicip: false };
        let flags = args.apply(FeatureFlags::default());

        assert!(flags.show_proxy);
        assert!(!flags.show_itunes);
        assert!(flags.show_musicip);
    }

    #[test]
    fn test_server_override() {
        let mut config = WizardConfig::default();
        apply_server_override(&mut config, Some("http://music.local:9000"));
        assert_eq!(config.server.url, "http://music.local:9000");

        apply_server_override(&mut config, None);
        assert_eq!(config.server.url, "http://music.local:9000");
    }
}

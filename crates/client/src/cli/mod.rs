//! CLI command definitions.

pub mod cache;
pub mod profiles;
pub mod qr;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;

/// Manage user profiles from the terminal.
#[derive(Debug, Parser)]
#[command(name = "profiledeck")]
#[command(about = "Manage user profiles: list, search, edit and share them as QR codes", long_about = None)]
pub struct Cli {
    /// API base URL [default: $PROFILEDECK_URL or http://localhost:5000].
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Always hit the network; skip the response cache.
    #[arg(long)]
    pub no_cache: bool,

    /// SQLite file backing the persistent cache [default: $CACHE_DB_PATH or profiledeck-cache.db].
    #[arg(long)]
    pub cache_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies the flags given on the command line over `config`.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(cache_db) = &self.cache_db {
            config.cache_db_path = cache_db.clone();
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Profile management.
    Profiles(profiles::ProfilesCommand),
    /// Share profiles as QR codes and read them back.
    Qr(qr::QrCommand),
    /// Local response cache.
    Cache(cache::CacheCommand),
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
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "profiledeck",
            "--base-url",
            "http://api.test",
            "--format",
            "json",
            "--no-cache",
            "cache",
            "stats",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://api.test"));
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.no_cache);
        assert!(!cli.quiet);
    }

    fn config() -> Config {
        Config {
            base_url: "http://from-env:5000".to_string(),
            cache_ttl_seconds: 300,
            cache_max_entries: 100,
            cache_db_path: PathBuf::from("env.db"),
            search_debounce_ms: 300,
            qr_image_size: 256,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "profiledeck",
            "--base-url",
            "http://api.test",
            "--cache-db",
            "flag.db",
            "cache",
            "stats",
        ])
        .unwrap();

        let config = cli.apply_to(config());
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.cache_db_path, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_config_used_without_flags() {
        let cli = Cli::try_parse_from(["profiledeck", "cache", "stats"]).unwrap();

        assert_eq!(cli.apply_to(config()), config());
    }
}

//! Cache CLI commands.

use clap::{Parser, Subcommand};

/// Local cache commands.
#[derive(Debug, Parser)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Available cache actions.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Remove every cached response.
    Clear,
    /// Show cache size.
    Stats,
}

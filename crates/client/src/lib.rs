//! profiledeck_client - imperative shell for profiledeck.
//!
//! HTTP API client, two-layer response cache, pagination coordinator, QR
//! image codec and the `profiledeck` CLI.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod qr;

pub use client::ProfileClient;
pub use config::Config;
pub use error::{ClientError, Result};

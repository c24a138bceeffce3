//! QR CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// QR code commands.
#[derive(Debug, Parser)]
pub struct QrCommand {
    #[command(subcommand)]
    pub action: QrAction,
}

/// Available QR actions.
#[derive(Debug, Subcommand)]
pub enum QrAction {
    /// Write a profile's QR code as a PNG.
    Encode {
        /// Profile ID.
        id: String,
        /// Output path (default: derived from the profile name).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Image side length in pixels.
        #[arg(long, env = "QR_IMAGE_SIZE")]
        size: Option<u32>,
    },
    /// Read a profile QR code from an image and print the form.
    Decode {
        /// PNG or JPEG image.
        image: PathBuf,
    },
    /// Read a profile QR code and submit it.
    Apply {
        /// PNG or JPEG image.
        image: PathBuf,
        /// Update this profile instead of creating a new one.
        #[arg(long)]
        id: Option<String>,
    },
    /// Scan a sequence of captured frames until one holds a profile code.
    Scan {
        /// Frames, scanned in order.
        #[arg(required = true)]
        frames: Vec<PathBuf>,
    },
}

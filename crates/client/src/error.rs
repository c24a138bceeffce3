//! Client error types.

use std::path::PathBuf;

use profiledeck_core::api::ApiResult;
use profiledeck_core::profile::{Profile, ProfileError};
use profiledeck_core::qr::QrError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced to the CLI.
///
/// API operations themselves never fail past their boundary; a failed
/// [`ApiResult`](profiledeck_core::api::ApiResult) is turned into one of
/// these only when a command needs to stop.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Api(String),

    #[error("Profile not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Validation(#[from] ProfileError),

    #[error(transparent)]
    Qr(#[from] QrError),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Unwraps a successful result, or turns a failed one into [`ClientError::Api`].
pub fn ensure_success<T>(result: ApiResult<T>) -> Result<T> {
    if result.success {
        Ok(result.data)
    } else {
        Err(ClientError::Api(result.message))
    }
}

/// Unwraps a fetched profile. A failure with no data is a missing profile.
pub fn require_profile(result: ApiResult<Option<Profile>>, id: &str) -> Result<Profile> {
    match result.data {
        Some(profile) if result.success => Ok(profile),
        None => Err(ClientError::NotFound { id: id.to_string() }),
        Some(_) => Err(ClientError::Api(result.message)),
    }
}

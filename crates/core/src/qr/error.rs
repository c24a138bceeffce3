use thiserror::Error;

/// Errors raised by QR encoding, scanning and camera sessions.
///
/// Parse and validation failures share one message so callers can surface it
/// verbatim without leaking payload details.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("Invalid QR code format")]
    InvalidFormat,
    #[error("No QR code found in image")]
    NotDetected,
    #[error("Unreadable image: {0}")]
    InvalidImage(String),
    #[error("Failed to generate QR code: {0}")]
    Encode(String),
    #[error("Camera error: {0}")]
    Camera(String),
    #[error("No camera device available")]
    NoDevice,
    #[error("Scan session is not active")]
    NotActive,
}

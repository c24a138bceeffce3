//! Camera scan sessions.
//!
//! A [`ScanSession`] owns a [`CameraBackend`] and moves through
//! `Idle -> Starting -> Active(device) -> Stopping -> Idle`. The camera is
//! released on every way out: explicit stop, successful decode, close and
//! drop.

use async_trait::async_trait;
use image::GrayImage;
use serde::Serialize;

use profiledeck_core::qr::{decode_payload, QrEnvelope, QrError};

use super::scan::detect_text;

/// A camera the backend can open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraDevice {
    pub id: String,
    pub label: String,
}

/// Access to a camera: enumerate devices, open one, grab frames, release.
#[async_trait]
pub trait CameraBackend: Send {
    async fn list_devices(&mut self) -> Result<Vec<CameraDevice>, QrError>;

    /// Opens `device_id`. Only one device is open at a time.
    async fn start(&mut self, device_id: &str) -> Result<(), QrError>;

    async fn next_frame(&mut self) -> Result<GrayImage, QrError>;

    /// Releases the open device, if any. Must be safe to call repeatedly.
    fn stop(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Starting(String),
    Active(String),
    Stopping,
}

pub struct ScanSession<B: CameraBackend> {
    backend: B,
    state: ScanState,
}

impl<B: CameraBackend> ScanSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// The device currently open, if any.
    pub fn active_device(&self) -> Option<&str> {
        match &self.state {
            ScanState::Active(device) => Some(device),
            _ => None,
        }
    }

    pub async fn devices(&mut self) -> Result<Vec<CameraDevice>, QrError> {
        self.backend.list_devices().await
    }

    /// Opens `device_id`, or the first available device when `None`.
    ///
    /// A session that is already running is stopped first.
    pub async fn start(&mut self, device_id: Option<&str>) -> Result<(), QrError> {
        self.stop();

        let device = match device_id {
            Some(id) => id.to_string(),
            None => self
                .backend
                .list_devices()
                .await?
                .into_iter()
                .next()
                .map(|d| d.id)
                .ok_or(QrError::NoDevice)?,
        };

        self.open(device).await
    }

    /// Grabs one frame and makes one detection attempt.
    ///
    /// Returns `Ok(None)` when the frame holds no code. A valid payload
    /// stops the session. An invalid payload is returned as an error and the
    /// session keeps running.
    pub async fn scan_frame(&mut self) -> Result<Option<QrEnvelope>, QrError> {
        if self.active_device().is_none() {
            return Err(QrError::NotActive);
        }

        let frame = self.backend.next_frame().await?;
        let text = match detect_text(&frame) {
            Ok(text) => text,
            Err(QrError::NotDetected) => return Ok(None),
            Err(err) => return Err(err),
        };

        let envelope = decode_payload(&text)?;
        tracing::debug!("Decoded profile payload, stopping scan");
        self.stop();
        Ok(Some(envelope))
    }

    /// Scans frames until a payload decodes or the camera fails.
    ///
    /// The session is stopped whichever way this returns.
    pub async fn next_payload(&mut self) -> Result<QrEnvelope, QrError> {
        loop {
            match self.scan_frame().await {
                Ok(Some(envelope)) => return Ok(envelope),
                Ok(None) => continue,
                Err(err) => {
                    self.stop();
                    return Err(err);
                }
            }
        }
    }

    /// Moves an active session to another device.
    ///
    /// If the new device cannot be opened the previous one is reopened and
    /// the error is returned.
    pub async fn switch_device(&mut self, device_id: &str) -> Result<(), QrError> {
        let Some(previous) = self.active_device().map(str::to_string) else {
            return Err(QrError::NotActive);
        };

        self.stop();

        match self.open(device_id.to_string()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(device = device_id, error = %err, "Camera switch failed, restoring previous device");
                if let Err(restore_err) = self.open(previous).await {
                    tracing::warn!(error = %restore_err, "Could not reopen previous camera");
                }
                Err(err)
            }
        }
    }

    /// Releases the camera and returns to `Idle`.
    pub fn stop(&mut self) {
        if self.state == ScanState::Idle {
            return;
        }
        self.state = ScanState::Stopping;
        self.backend.stop();
        self.state = ScanState::Idle;
    }

    /// Stops the session and drops it.
    pub fn close(mut self) {
        self.stop();
    }

    async fn open(&mut self, device: String) -> Result<(), QrError> {
        self.state = ScanState::Starting(device.clone());
        match self.backend.start(&device).await {
            Ok(()) => {
                tracing::debug!(%device, "Camera started");
                self.state = ScanState::Active(device);
                Ok(())
            }
            Err(err) => {
                self.backend.stop();
                self.state = ScanState::Idle;
                Err(err)
            }
        }
    }
}

impl<B: CameraBackend> Drop for ScanSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use image::GrayImage;

use profiledeck_core::qr::QrError;

use super::session::{CameraBackend, CameraDevice};

/// Device id exposed by [`FileCamera`].
pub const FILE_DEVICE_ID: &str = "files";

/// A camera whose frames are image files read in order.
///
/// Lets the CLI drive a [`ScanSession`](super::ScanSession) over captured
/// stills, e.g. frames dumped from a webcam.
#[derive(Debug)]
pub struct FileCamera {
    pending: VecDeque<PathBuf>,
    open: bool,
}

impl FileCamera {
    pub fn new(frames: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
            open: false,
        }
    }
}

#[async_trait]
impl CameraBackend for FileCamera {
    async fn list_devices(&mut self) -> Result<Vec<CameraDevice>, QrError> {
        Ok(vec![CameraDevice {
            id: FILE_DEVICE_ID.to_string(),
            label: format!("{} image file(s)", self.pending.len()),
        }])
    }

    async fn start(&mut self, device_id: &str) -> Result<(), QrError> {
        if device_id != FILE_DEVICE_ID {
            return Err(QrError::Camera(format!("unknown device: {device_id}")));
        }
        self.open = true;
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<GrayImage, QrError> {
        if !self.open {
            return Err(QrError::NotActive);
        }
        let path = self
            .pending
            .pop_front()
            .ok_or_else(|| QrError::Camera("no more frames".to_string()))?;

        tracing::debug!(path = %path.display(), "Reading frame");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| QrError::InvalidImage(format!("{}: {e}", path.display())))?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| QrError::InvalidImage(format!("{}: {e}", path.display())))?;
        Ok(image.to_luma8())
    }

    fn stop(&mut self) {
        self.open = false;
    }
}

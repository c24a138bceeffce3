//! QR image codec and scanning.

mod file_camera;
mod render;
mod scan;
mod session;

pub use file_camera::{FileCamera, FILE_DEVICE_ID};
pub use render::{render_image, render_png, RenderOptions, DEFAULT_IMAGE_SIZE};
pub use scan::{detect_text, scan_image};
pub use session::{CameraBackend, CameraDevice, ScanSession, ScanState};

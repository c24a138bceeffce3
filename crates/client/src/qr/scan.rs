//! QR detection on still images.

use image::GrayImage;

use profiledeck_core::qr::{decode_payload, QrEnvelope, QrError};

/// Detects a QR code in a greyscale image and returns its text.
///
/// One detection attempt. Grids that are found but cannot be read count as
/// nothing found.
pub fn detect_text(image: &GrayImage) -> Result<String, QrError> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );

    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(err) => tracing::debug!(error = ?err, "Unreadable QR grid"),
        }
    }

    Err(QrError::NotDetected)
}

/// Decodes a profile payload from an encoded image (PNG or JPEG).
pub fn scan_image(bytes: &[u8]) -> Result<QrEnvelope, QrError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| QrError::InvalidImage(e.to_string()))?
        .to_luma8();
    let text = detect_text(&image)?;
    decode_payload(&text)
}

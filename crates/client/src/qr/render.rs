//! QR image rendering.

use std::io::Cursor;

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::QrCode;

use profiledeck_core::profile::Profile;
use profiledeck_core::qr::{build_envelope, encode_payload, QrError};

/// Default side length of rendered images, in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 256;

const DARK: Luma<u8> = Luma([0x00]);
const LIGHT: Luma<u8> = Luma([0xFF]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Side length of the square output image.
    pub size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl RenderOptions {
    pub fn with_size(size: u32) -> Self {
        Self { size: size.max(1) }
    }
}

/// Renders a profile's QR code as a `size` x `size` greyscale image.
pub fn render_image(profile: &Profile, options: RenderOptions) -> Result<GrayImage, QrError> {
    let payload = encode_payload(&build_envelope(profile))?;
    let code = QrCode::new(payload.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

    let size = options.size.max(1);
    let rendered = code
        .render::<Luma<u8>>()
        .dark_color(DARK)
        .light_color(LIGHT)
        .max_dimensions(size, size)
        .build();

    if rendered.width() > size || rendered.height() > size {
        tracing::debug!(
            width = rendered.width(),
            size,
            "QR code exceeds requested size, scaling down"
        );
        return Ok(imageops::resize(
            &rendered,
            size,
            size,
            imageops::FilterType::Nearest,
        ));
    }

    let mut canvas = GrayImage::from_pixel(size, size, LIGHT);
    let x = i64::from((size - rendered.width()) / 2);
    let y = i64::from((size - rendered.height()) / 2);
    imageops::overlay(&mut canvas, &rendered, x, y);
    Ok(canvas)
}

/// Renders a profile's QR code as PNG bytes.
pub fn render_png(profile: &Profile, options: RenderOptions) -> Result<Vec<u8>, QrError> {
    let image = render_image(profile, options)?;
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| QrError::Encode(e.to_string()))?;
    Ok(bytes)
}

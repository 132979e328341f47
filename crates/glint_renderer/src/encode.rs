//! PNG and base64 encoding of rendered images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur while encoding an image.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Encode a rendered image as an 8-bit RGB PNG.
pub fn encode_png(image: &ImageBuffer) -> EncodeResult<Vec<u8>> {
    encode_png_rgb8(image.width, image.height, &image.to_rgb_bytes())
}

/// Encode a packed `RGBRGB...` buffer of `width * height` pixels as PNG.
pub fn encode_png_rgb8(width: u32, height: u32, bytes: &[u8]) -> EncodeResult<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if bytes.len() != expected {
        return Err(EncodeError::BufferSize {
            expected,
            actual: bytes.len(),
        });
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(bytes, width, height, ColorType::Rgb8)?;

    log::debug!("Encoded {}x{} PNG ({} bytes)", width, height, png.len());
    Ok(png)
}

/// Standard padded base64, as used in `data:image/png;base64,` URIs.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

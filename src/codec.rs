//! Decoding input photos and encoding finished stickers.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, Limits};
use tracing::debug;

use crate::buffer::{ColorModel, PixelBuffer};
use crate::error::{DecodeError, StickerError};

/// Largest accepted input side, in pixels.
pub const DEFAULT_MAX_INPUT_DIMENSION: u32 = 8192;

/// Decode an encoded image (JPEG, PNG, WebP, ...) into a [`PixelBuffer`].
///
/// The result is 8 bits per channel. Sources with an alpha channel become
/// RGBA, everything else RGB. Images wider or taller than `max_dimension`
/// are rejected before their pixel data is decoded.
pub fn decode(data: &[u8], max_dimension: u32) -> Result<PixelBuffer, StickerError> {
    if data.is_empty() {
        return Err(DecodeError::Empty.into());
    }

    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(DecodeError::UnrecognizedFormat.into());
    };

    let (width, height) = reader.into_dimensions().map_err(classify_image_error)?;
    if width > max_dimension || height > max_dimension {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max: max_dimension,
        }
        .into());
    }

    // into_dimensions consumed the reader; start again for the pixel data.
    reader = ImageReader::with_format(Cursor::new(data), format);
    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);
    reader.limits(limits);

    let img = reader.decode().map_err(classify_image_error)?;
    debug!(?format, width, height, color = ?img.color(), "Decoded input image");

    normalize(img)
}

/// Reduce any decoded image to 8-bit RGB or RGBA.
fn normalize(img: DynamicImage) -> Result<PixelBuffer, StickerError> {
    if img.color().has_alpha() {
        PixelBuffer::from_rgba(img.into_rgba8())
    } else {
        PixelBuffer::from_rgb(img.into_rgb8())
    }
}

fn classify_image_error(err: ImageError) -> StickerError {
    match err {
        ImageError::Unsupported(_) => DecodeError::UnrecognizedFormat.into(),
        other => DecodeError::Malformed(other.to_string()).into(),
    }
}

/// Encode a buffer as PNG, keeping its color model (and alpha) intact.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, StickerError> {
    let (width, height) = (buffer.width(), buffer.height());
    let color_type = match buffer.model() {
        ColorModel::Rgb => ExtendedColorType::Rgb8,
        ColorModel::Rgba => ExtendedColorType::Rgba8,
    };

    let mut out = Vec::with_capacity(buffer.as_bytes().len() / 2);
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Default, FilterType::Adaptive);
    encoder
        .write_image(buffer.as_bytes(), width, height, color_type)
        .map_err(|e| StickerError::Encode(e.to_string()))?;

    debug!(width, height, bytes = out.len(), "Encoded PNG");
    Ok(out)
}

//! Numeric building blocks shared by the styles.
//!
//! Everything here works on 8-bit RGB planes. Intermediate values are kept
//! in `f32`/`i32` and clamped to `0..=255` before truncating to `u8`.
//! Neighborhood filters replicate the border pixels.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::filter::filter3x3;
use imageproc::gradients::sobel_gradient_map;

use crate::buffer::PixelBuffer;

/// Runs `f` over the color channels, carrying alpha through untouched.
///
/// `f` must keep the image dimensions.
pub fn map_color(image: PixelBuffer, f: impl FnOnce(RgbImage) -> RgbImage) -> PixelBuffer {
    let (color, alpha) = image.into_color_and_alpha();
    let out = f(color);
    PixelBuffer::from_color_and_alpha(out, alpha)
}

#[inline]
pub fn clamp_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// ITU-R 601-2 luma, the same weights grayscale conversion uses.
#[inline]
pub fn luma(rgb: [u8; 3]) -> f32 {
    0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32
}

/// Scales contrast around the image's mean luma.
///
/// Each channel moves to `mean + factor * (value - mean)`. A factor of 1
/// leaves the image unchanged; 0 produces a flat gray.
pub fn adjust_contrast(img: &mut RgbImage, factor: f32) {
    let count = img.width() as f64 * img.height() as f64;
    if count == 0.0 {
        return;
    }
    let sum: f64 = img.pixels().map(|p| luma(p.0) as f64).sum();
    let mean = (sum / count + 0.5).floor() as f32;

    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = clamp_u8(mean + factor * (*channel as f32 - mean));
        }
    }
}

/// Scales every channel by `factor` (0 = black, 1 = unchanged).
pub fn adjust_brightness(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = clamp_u8(*channel as f32 * factor);
        }
    }
}

/// 3x3 neighborhood average, rounded to nearest.
pub fn box_smooth(img: &RgbImage) -> RgbImage {
    // Unit weights keep the 9-tap sums exact before the single division.
    let sums = filter3x3::<_, f32, f32>(img, &[1.0; 9]);
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        Rgb(sums.get_pixel(x, y).0.map(|sum| clamp_u8((sum / 9.0).round())))
    })
}

/// Per-channel Sobel gradient magnitude, clamped to 255.
pub fn sobel_per_channel(img: &RgbImage) -> RgbImage {
    sobel_gradient_map(img, |magnitude: Rgb<u16>| Rgb(magnitude.0.map(|m| m.min(255) as u8)))
}

/// Luma plane of an RGB image.
pub fn to_gray(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([clamp_u8(luma(img.get_pixel(x, y).0).round())])
    })
}

//! Vintage style: sepia toning followed by a slight darkening.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::{adjust_brightness, clamp_u8, map_color};
use crate::buffer::PixelBuffer;

/// Configuration for the vintage style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VintageConfig {
    /// Brightness factor applied after the sepia matrix (1.0 = unchanged).
    pub brightness: f32,
}

impl Default for VintageConfig {
    fn default() -> Self {
        Self { brightness: 0.8 }
    }
}

impl StyleEffect for VintageConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        map_color(image, |mut img| {
            sepia(&mut img);
            if (self.brightness - 1.0).abs() > f32::EPSILON {
                adjust_brightness(&mut img, self.brightness);
            }
            img
        })
    }
}

/// Applies the standard sepia matrix in place.
pub fn sepia(img: &mut RgbImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b] = pixel.0.map(f32::from);
        pixel.0 = [
            clamp_u8(0.393 * r + 0.769 * g + 0.189 * b),
            clamp_u8(0.349 * r + 0.686 * g + 0.168 * b),
            clamp_u8(0.272 * r + 0.534 * g + 0.131 * b),
        ];
    }
}

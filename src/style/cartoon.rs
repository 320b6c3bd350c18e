//! Cartoon style: boosted saturation, softened detail, extra contrast.

use image::RgbImage;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::{adjust_contrast, box_smooth, map_color};
use crate::buffer::PixelBuffer;

// ============================================================================
// CartoonConfig
// ============================================================================

/// Configuration for the cartoon style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartoonConfig {
    /// Multiplier applied to HSL saturation.
    pub saturation: f32,

    /// Whether to run a 3x3 averaging pass after the color boost.
    pub smooth: bool,

    /// Contrast factor applied last (1.0 = unchanged).
    pub contrast: f32,
}

impl Default for CartoonConfig {
    fn default() -> Self {
        Self {
            saturation: 1.3,
            smooth: true,
            contrast: 1.2,
        }
    }
}

impl StyleEffect for CartoonConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        map_color(image, |mut img| {
            saturate(&mut img, self.saturation);
            if self.smooth {
                img = box_smooth(&img);
            }
            if (self.contrast - 1.0).abs() > f32::EPSILON {
                adjust_contrast(&mut img, self.contrast);
            }
            img
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Multiplies the saturation of every pixel, capped at full saturation.
pub fn saturate(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        let [r, g, b] = pixel.0;

        let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let mut hsl: Hsl = rgb.into_color();
        hsl.saturation = (hsl.saturation * factor).clamp(0.0, 1.0);
        let boosted: Srgb = hsl.into_color();

        pixel.0 = [
            (boosted.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (boosted.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (boosted.blue * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }
}

//! Black-and-white sketch: inverted grayscale edge map.

use image::{Rgb, RgbImage};
use imageproc::gradients::sobel_gradients;
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::{clamp_u8, map_color, to_gray};
use crate::buffer::PixelBuffer;

/// Configuration for the sketch style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SketchConfig {
    /// Multiplier on the edge magnitude before inversion. Higher values
    /// give darker lines.
    pub edge_gain: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self { edge_gain: 1.0 }
    }
}

impl StyleEffect for SketchConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        map_color(image, |img| {
            let gradients = sobel_gradients(&to_gray(&img));
            RgbImage::from_fn(img.width(), img.height(), |x, y| {
                let edge = clamp_u8(gradients.get_pixel(x, y)[0] as f32 * self.edge_gain);
                let v = 255 - edge;
                Rgb([v, v, v])
            })
        })
    }
}

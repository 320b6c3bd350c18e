//! Outline style: contours emphasized by blending in a Sobel edge map.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::{adjust_contrast, clamp_u8, map_color, sobel_per_channel};
use crate::buffer::PixelBuffer;

/// Configuration for the outline style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutlineConfig {
    /// Contrast factor applied to the edge map before blending.
    pub edge_contrast: f32,

    /// Weight of the edge map in the final blend (0.0-1.0).
    pub blend: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            edge_contrast: 3.0,
            blend: 0.2,
        }
    }
}

impl StyleEffect for OutlineConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        let blend = self.blend.clamp(0.0, 1.0);
        map_color(image, |img| {
            let mut edges = sobel_per_channel(&img);
            adjust_contrast(&mut edges, self.edge_contrast);
            blend_over(&img, &edges, blend)
        })
    }
}

/// `base * (1 - weight) + top * weight`, per channel.
fn blend_over(base: &RgbImage, top: &RgbImage, weight: f32) -> RgbImage {
    RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let b = base.get_pixel(x, y).0;
        let t = top.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|c| {
            clamp_u8(b[c] as f32 * (1.0 - weight) + t[c] as f32 * weight + 0.5)
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image() -> PixelBuffer {
        let img = RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgb([40, 40, 40])
            } else {
                Rgb([200, 200, 200])
            }
        });
        PixelBuffer::from_rgb(img).unwrap()
    }

    #[test]
    fn flat_regions_are_only_dimmed_by_the_blend() {
        let out = OutlineConfig::default().apply(step_image());
        // Far from the step the edge map is black, so only the base weight remains.
        assert_eq!(out.pixel(0, 0), &[32, 32, 32]);
        assert_eq!(out.pixel(7, 0), &[160, 160, 160]);
    }

    #[test]
    fn pixels_on_the_step_are_brightened() {
        let input = step_image();
        let out = OutlineConfig::default().apply(input.clone());
        assert!(out.pixel(3, 1)[0] > input.pixel(3, 1)[0]);
    }

    #[test]
    fn zero_blend_is_identity() {
        let input = step_image();
        let out = OutlineConfig { blend: 0.0, ..Default::default() }.apply(input.clone());
        assert_eq!(out, input);
    }
}

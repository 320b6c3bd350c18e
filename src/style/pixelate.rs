//! Pixel-art style: nearest-neighbor down and up sampling.

use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::map_color;
use crate::buffer::PixelBuffer;

/// Configuration for the pixelate style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixelateConfig {
    /// Side of the intermediate block grid. Images smaller than the grid
    /// keep their own size along that axis.
    pub grid: u32,
}

impl Default for PixelateConfig {
    fn default() -> Self {
        Self { grid: 100 }
    }
}

impl PixelateConfig {
    /// Grid size actually used for an image of the given size.
    pub fn grid_for(&self, width: u32, height: u32) -> (u32, u32) {
        let grid = self.grid.max(1);
        (grid.min(width), grid.min(height))
    }
}

impl StyleEffect for PixelateConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        let (width, height) = (image.width(), image.height());
        let (grid_w, grid_h) = self.grid_for(width, height);
        if (grid_w, grid_h) == (width, height) {
            return image;
        }

        // Alpha is blocked together with color so transparent regions stay aligned.
        if image.has_alpha() {
            let rgba = image.into_rgba8();
            let small = imageops::resize(&rgba, grid_w, grid_h, FilterType::Nearest);
            return PixelBuffer::rgba(imageops::resize(&small, width, height, FilterType::Nearest));
        }

        map_color(image, |img| {
            let small = imageops::resize(&img, grid_w, grid_h, FilterType::Nearest);
            imageops::resize(&small, width, height, FilterType::Nearest)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::collections::HashSet;

    fn noise(side: u32) -> PixelBuffer {
        let img = RgbImage::from_fn(side, side, |x, y| {
            let v = x.wrapping_mul(2_654_435_761).wrapping_add(y.wrapping_mul(40_503));
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        });
        PixelBuffer::from_rgb(img).unwrap()
    }

    fn distinct_pixels(buf: &PixelBuffer) -> usize {
        buf.as_bytes()
            .chunks_exact(buf.channels())
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn at_most_grid_squared_colors() {
        for (side, grid) in [(16, 4), (30, 7), (64, 10)] {
            let input = noise(side);
            assert!(distinct_pixels(&input) > (grid * grid) as usize);

            let out = PixelateConfig { grid }.apply(input);
            assert_eq!((out.width(), out.height()), (side, side));
            assert!(distinct_pixels(&out) <= (grid * grid) as usize);
        }
    }

    #[test]
    fn blocks_are_uniform_for_exact_multiples() {
        let out = PixelateConfig { grid: 2 }.apply(noise(8));
        for by in 0..2 {
            for bx in 0..2 {
                let first = out.pixel(bx * 4, by * 4).to_vec();
                for y in by * 4..by * 4 + 4 {
                    for x in bx * 4..bx * 4 + 4 {
                        assert_eq!(out.pixel(x, y), first.as_slice());
                    }
                }
            }
        }
    }

    #[test]
    fn small_images_pass_through() {
        let input = noise(5);
        assert_eq!(PixelateConfig::default().apply(input.clone()), input);
    }

    #[test]
    fn grid_clamps_per_axis() {
        let config = PixelateConfig { grid: 100 };
        assert_eq!(config.grid_for(640, 40), (100, 40));
        assert_eq!(PixelateConfig { grid: 0 }.grid_for(10, 10), (1, 1));
    }
}

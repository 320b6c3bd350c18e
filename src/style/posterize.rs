//! Geometric style: median-cut palette reduction (posterization).

use std::collections::HashMap;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use super::StyleEffect;
use super::filters::map_color;
use crate::buffer::PixelBuffer;

/// Configuration for the geometric style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PosterizeConfig {
    /// Maximum number of palette entries.
    pub colors: usize,
}

impl Default for PosterizeConfig {
    fn default() -> Self {
        Self { colors: 8 }
    }
}

impl StyleEffect for PosterizeConfig {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        let colors = self.colors.max(1);
        map_color(image, |img| {
            let palette = median_cut(&img, colors);
            remap(&img, &palette)
        })
    }
}

// ============================================================================
// Median cut
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ColorCount {
    rgb: [u8; 3],
    count: u32,
}

#[derive(Debug)]
struct ColorBox {
    colors: Vec<ColorCount>,
}

impl ColorBox {
    /// Widest channel and its extent.
    fn widest_channel(&self) -> (usize, u8) {
        (0..3)
            .map(|c| {
                let (min, max) = self.colors.iter().fold((u8::MAX, u8::MIN), |(lo, hi), cc| {
                    (lo.min(cc.rgb[c]), hi.max(cc.rgb[c]))
                });
                (c, max.saturating_sub(min))
            })
            .max_by_key(|&(_, range)| range)
            .unwrap_or((0, 0))
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    /// Splits at the pixel-weighted median of the widest channel.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors.sort_unstable_by_key(|cc| cc.rgb[channel]);

        let total: u64 = self.colors.iter().map(|cc| cc.count as u64).sum();
        let mut acc = 0u64;
        let mut split_at = 0;
        for (i, cc) in self.colors.iter().enumerate() {
            acc += cc.count as u64;
            if acc * 2 >= total {
                split_at = i;
                break;
            }
        }
        // Both halves must be non-empty.
        split_at = split_at.min(self.colors.len() - 2);

        let right = self.colors.split_off(split_at + 1);
        (self, ColorBox { colors: right })
    }

    /// Pixel-weighted mean color.
    fn average(&self) -> [u8; 3] {
        let mut sum = [0u64; 3];
        let mut total = 0u64;
        for cc in &self.colors {
            for c in 0..3 {
                sum[c] += cc.rgb[c] as u64 * cc.count as u64;
            }
            total += cc.count as u64;
        }
        if total == 0 {
            return [0, 0, 0];
        }
        sum.map(|s| ((s + total / 2) / total) as u8)
    }
}

/// Builds an adaptive palette of at most `max_colors` entries.
pub fn median_cut(img: &RgbImage, max_colors: usize) -> Vec<[u8; 3]> {
    let mut histogram: HashMap<[u8; 3], u32> = HashMap::new();
    for pixel in img.pixels() {
        *histogram.entry(pixel.0).or_insert(0) += 1;
    }
    if histogram.is_empty() {
        return vec![[0, 0, 0]];
    }

    let colors = histogram
        .into_iter()
        .map(|(rgb, count)| ColorCount { rgb, count })
        .collect();
    let mut boxes = vec![ColorBox { colors }];

    while boxes.len() < max_colors {
        let Some(idx) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.can_split())
            .max_by_key(|(_, b)| b.widest_channel().1)
            .map(|(i, _)| i)
        else {
            break;
        };
        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.iter().map(ColorBox::average).collect()
}

/// Maps every pixel to its nearest palette entry (squared RGB distance).
pub fn remap(img: &RgbImage, palette: &[[u8; 3]]) -> RgbImage {
    let mut cache: HashMap<[u8; 3], [u8; 3]> = HashMap::new();
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let mapped = *cache
            .entry(pixel.0)
            .or_insert_with(|| nearest(pixel.0, palette));
        *pixel = Rgb(mapped);
    }
    out
}

fn nearest(rgb: [u8; 3], palette: &[[u8; 3]]) -> [u8; 3] {
    palette
        .iter()
        .copied()
        .min_by_key(|p| {
            (0..3)
                .map(|c| {
                    let d = rgb[c] as i32 - p[c] as i32;
                    d * d
                })
                .sum::<i32>()
        })
        .unwrap_or(rgb)
}

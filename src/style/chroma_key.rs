//! Background removal by brightness chroma key.
//!
//! Not segmentation: any pixel whose red, green and blue all exceed the
//! threshold is treated as background.

use serde::{Deserialize, Serialize};

use super::StyleEffect;
use crate::buffer::PixelBuffer;

/// Default brightness threshold for the chroma key.
pub const DEFAULT_CHROMA_KEY_THRESHOLD: u8 = 200;

/// Configuration for the no-background style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChromaKeyConfig {
    /// Channels strictly above this value count as background.
    pub threshold: u8,
}

impl Default for ChromaKeyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CHROMA_KEY_THRESHOLD,
        }
    }
}

impl ChromaKeyConfig {
    /// Returns true if the color is keyed out.
    #[inline]
    pub fn is_background(&self, rgb: [u8; 3]) -> bool {
        rgb.iter().all(|&c| c > self.threshold)
    }
}

impl StyleEffect for ChromaKeyConfig {
    /// Always yields RGBA: alpha 0 for background pixels, 255 for the rest.
    fn apply(&self, image: PixelBuffer) -> PixelBuffer {
        let mut img = image.into_rgba8();
        for pixel in img.pixels_mut() {
            let [r, g, b, _] = pixel.0;
            let keyed = self.is_background([r, g, b]);
            pixel.0[3] = if keyed { 0 } else { 255 };
        }
        PixelBuffer::rgba(img)
    }
}

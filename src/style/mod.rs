//! Style engine for sticker rendering.
//!
//! Every visual style is a variant of the closed [`StyleId`] enum. Its
//! tunable constants live in a config struct implementing [`StyleEffect`],
//! and [`StyleSettings`] holds one config per style and dispatches to it.
//!
//! # Architecture
//!
//! ```text
//! PixelBuffer ──► StyleSettings::apply(style) ──► PixelBuffer
//!                       │
//!                       ├── Cartoon       (saturation, smoothing, contrast)
//!                       ├── Pixelate      (nearest down/up sampling)
//!                       ├── Outline       (per-channel Sobel blend)
//!                       ├── Vintage       (sepia matrix, darken)
//!                       ├── NoBackground  (brightness chroma key)
//!                       ├── Geometric     (median-cut posterize)
//!                       ├── BwSketch      (inverted grayscale edges)
//!                       └── Simple        (identity)
//! ```
//!
//! All styles preserve width and height. Resizing to the sticker canvas is
//! the compositor's job.

pub mod cartoon;
pub mod chroma_key;
pub mod filters;
pub mod outline;
pub mod pixelate;
pub mod posterize;
pub mod sketch;
pub mod vintage;

pub use cartoon::CartoonConfig;
pub use chroma_key::{ChromaKeyConfig, DEFAULT_CHROMA_KEY_THRESHOLD};
pub use outline::OutlineConfig;
pub use pixelate::PixelateConfig;
pub use posterize::PosterizeConfig;
pub use sketch::SketchConfig;
pub use vintage::VintageConfig;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::canvas::FitMode;
use crate::error::StickerError;

// ============================================================================
// StyleId
// ============================================================================

/// Identifier of a sticker style.
///
/// Serialized as a kebab-case slug (`"no-background"`, `"bw-sketch"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    /// Brighter colors with softened detail.
    #[default]
    Cartoon,
    /// Retro blocky pixel art.
    #[serde(alias = "pixel")]
    Pixelate,
    /// Emphasized contours.
    Outline,
    /// Sepia-toned old photo.
    Vintage,
    /// Near-white background keyed out to transparency.
    NoBackground,
    /// Flat posterized color areas.
    Geometric,
    /// Dark pencil lines on white.
    BwSketch,
    /// The photo as-is.
    Simple,
}

impl StyleId {
    /// Every style, in menu order.
    pub const ALL: [StyleId; 8] = [
        StyleId::Cartoon,
        StyleId::Pixelate,
        StyleId::Outline,
        StyleId::Vintage,
        StyleId::NoBackground,
        StyleId::Geometric,
        StyleId::BwSketch,
        StyleId::Simple,
    ];

    /// Stable machine-readable name.
    pub fn slug(self) -> &'static str {
        match self {
            StyleId::Cartoon => "cartoon",
            StyleId::Pixelate => "pixelate",
            StyleId::Outline => "outline",
            StyleId::Vintage => "vintage",
            StyleId::NoBackground => "no-background",
            StyleId::Geometric => "geometric",
            StyleId::BwSketch => "bw-sketch",
            StyleId::Simple => "simple",
        }
    }

    /// Label shown on the style keyboard.
    pub fn label(self) -> &'static str {
        match self {
            StyleId::Cartoon => "🎨 Cartoon",
            StyleId::Pixelate => "👾 Pixel art",
            StyleId::Outline => "🌈 Outline",
            StyleId::Vintage => "🔥 Vintage",
            StyleId::NoBackground => "✂️ No background",
            StyleId::Geometric => "🔷 Geometric",
            StyleId::BwSketch => "✏️ Sketch",
            StyleId::Simple => "🖼 Simple",
        }
    }

    /// One-line description for help text.
    pub fn description(self) -> &'static str {
        match self {
            StyleId::Cartoon => "bright colors",
            StyleId::Pixelate => "retro style",
            StyleId::Outline => "highlights edges",
            StyleId::Vintage => "old-time effect",
            StyleId::NoBackground => "removes a light background",
            StyleId::Geometric => "flat color areas",
            StyleId::BwSketch => "black and white pencil lines",
            StyleId::Simple => "the photo as a sticker",
        }
    }

    /// How this style's output is mapped onto the square canvas.
    pub fn fit_mode(self) -> FitMode {
        match self {
            StyleId::NoBackground | StyleId::Simple => FitMode::FitWithPadding,
            _ => FitMode::CropToSquare,
        }
    }

    /// Whether the canvas behind this style is transparent.
    pub fn transparent_background(self) -> bool {
        matches!(self, StyleId::NoBackground | StyleId::Simple)
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StyleId {
    type Err = StickerError;

    /// Accepts slugs (case-insensitive), keyboard labels, and the legacy
    /// `pixel` alias. Anything else is an [`StickerError::UnsupportedStyle`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower == "pixel" {
            return Ok(StyleId::Pixelate);
        }
        StyleId::ALL
            .into_iter()
            .find(|style| style.slug() == lower || style.label() == trimmed)
            .ok_or_else(|| StickerError::UnsupportedStyle(s.to_string()))
    }
}

// ============================================================================
// StyleEffect
// ============================================================================

/// Trait for style configurations that know how to apply themselves.
///
/// Implementations are pure: the same input always yields the same output,
/// and the output keeps the input's width and height.
pub trait StyleEffect {
    fn apply(&self, image: PixelBuffer) -> PixelBuffer;
}

// ============================================================================
// StyleSettings
// ============================================================================

/// Tunable constants for every style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    pub cartoon: CartoonConfig,
    pub pixelate: PixelateConfig,
    pub outline: OutlineConfig,
    pub vintage: VintageConfig,
    pub no_background: ChromaKeyConfig,
    pub geometric: PosterizeConfig,
    pub bw_sketch: SketchConfig,
}

impl StyleSettings {
    /// Applies `style` to `image`.
    pub fn apply(&self, style: StyleId, image: PixelBuffer) -> PixelBuffer {
        let size = image.dimensions();
        debug!(%style, width = size.width, height = size.height, "Applying style");

        let out = match style {
            StyleId::Cartoon => self.cartoon.apply(image),
            StyleId::Pixelate => self.pixelate.apply(image),
            StyleId::Outline => self.outline.apply(image),
            StyleId::Vintage => self.vintage.apply(image),
            StyleId::NoBackground => self.no_background.apply(image),
            StyleId::Geometric => self.geometric.apply(image),
            StyleId::BwSketch => self.bw_sketch.apply(image),
            StyleId::Simple => image,
        };

        debug_assert_eq!(out.dimensions(), size, "{style} changed the image size");
        out
    }

    /// Rejects constants that would make a style meaningless.
    pub fn validate(&self) -> Result<(), StickerError> {
        if self.pixelate.grid == 0 {
            return Err(StickerError::InvalidConfig(
                "pixelate grid must be at least 1".into(),
            ));
        }
        if !(2..=256).contains(&self.geometric.colors) {
            return Err(StickerError::InvalidConfig(format!(
                "geometric palette size must be within 2..=256, got {}",
                self.geometric.colors
            )));
        }
        if !(0.0..=1.0).contains(&self.outline.blend) {
            return Err(StickerError::InvalidConfig(format!(
                "outline blend weight must be within 0..=1, got {}",
                self.outline.blend
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            pixel.0 = [(x * 20) as u8, (y * 30) as u8, ((x + y) * 10) as u8];
        }
        PixelBuffer::from_rgb(img).unwrap()
    }

    #[test]
    fn slugs_roundtrip_through_from_str() {
        for style in StyleId::ALL {
            assert_eq!(style.slug().parse::<StyleId>().unwrap(), style);
            assert_eq!(style.label().parse::<StyleId>().unwrap(), style);
            assert_eq!(style.to_string(), style.slug());
        }
    }

    #[test]
    fn from_str_accepts_case_and_legacy_alias() {
        assert_eq!("PIXEL".parse::<StyleId>().unwrap(), StyleId::Pixelate);
        assert_eq!(" Vintage ".parse::<StyleId>().unwrap(), StyleId::Vintage);
    }

    #[test]
    fn unknown_style_is_rejected_not_simple() {
        for id in ["sparkle", "", "simple!", "cartoon-ish"] {
            let err = id.parse::<StyleId>().unwrap_err();
            match err {
                StickerError::UnsupportedStyle(name) => assert_eq!(name, id),
                other => panic!("expected UnsupportedStyle, got {other:?}"),
            }
        }
    }

    #[test]
    fn serde_uses_slugs() {
        let json = serde_json::to_string(&StyleId::NoBackground).unwrap();
        assert_eq!(json, "\"no-background\"");
        let style: StyleId = serde_json::from_str("\"pixel\"").unwrap();
        assert_eq!(style, StyleId::Pixelate);
        assert!(serde_json::from_str::<StyleId>("\"sparkle\"").is_err());
    }

    #[test]
    fn every_style_preserves_dimensions() {
        let settings = StyleSettings::default();
        for style in StyleId::ALL {
            let out = settings.apply(style, gradient(9, 5));
            assert_eq!((out.width(), out.height()), (9, 5), "{style}");
        }
    }

    #[test]
    fn simple_is_identity() {
        let input = gradient(4, 4);
        let out = StyleSettings::default().apply(StyleId::Simple, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn styles_handle_single_pixel_images() {
        let settings = StyleSettings::default();
        for style in StyleId::ALL {
            let input = PixelBuffer::filled(1, 1, &[90, 120, 150, 200]).unwrap();
            let out = settings.apply(style, input);
            assert_eq!((out.width(), out.height()), (1, 1), "{style}");
        }
    }

    #[test]
    fn only_no_background_and_simple_pad() {
        assert_eq!(StyleId::NoBackground.fit_mode(), FitMode::FitWithPadding);
        assert_eq!(StyleId::Simple.fit_mode(), FitMode::FitWithPadding);
        assert_eq!(StyleId::Pixelate.fit_mode(), FitMode::CropToSquare);
        assert!(StyleId::NoBackground.transparent_background());
        assert!(!StyleId::Vintage.transparent_background());
    }

    #[test]
    fn validate_rejects_bad_constants() {
        let mut settings = StyleSettings::default();
        assert!(settings.validate().is_ok());

        settings.pixelate.grid = 0;
        assert!(settings.validate().is_err());

        let mut settings = StyleSettings::default();
        settings.geometric.colors = 1;
        assert!(settings.validate().is_err());
    }
}

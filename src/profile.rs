//! Serializable sticker configuration.
//!
//! A [`StickerProfile`] captures every tunable of the pipeline in a format
//! that can be stored as JSON and loaded at startup.
//!
//! # Example
//!
//! ```
//! use sticker_forge::{StickerProfile, StyleId};
//!
//! let profile = StickerProfile::new()
//!     .with_side(256)
//!     .with_default_style(StyleId::Vintage)
//!     .with_chroma_key_threshold(220);
//!
//! let json = profile.to_json().unwrap();
//! let restored = StickerProfile::from_json(&json).unwrap();
//! assert_eq!(restored.side, 256);
//! ```

use serde::{Deserialize, Serialize};

use crate::canvas::{DEFAULT_SIDE, Resampling};
use crate::codec::DEFAULT_MAX_INPUT_DIMENSION;
use crate::error::StickerError;
use crate::style::{StyleId, StyleSettings};

// ============================================================================
// StickerProfile
// ============================================================================

/// All sticker settings.
///
/// # JSON Format
///
/// Every field is optional; missing fields take their defaults.
///
/// ```json
/// {
///   "side": 512,
///   "defaultStyle": "cartoon",
///   "maxInputDimension": 8192,
///   "resampling": "lanczos3",
///   "paddingMargin": 1.0,
///   "backgroundColor": [255, 255, 255],
///   "styles": {
///     "pixelate": { "grid": 100 },
///     "noBackground": { "threshold": 200 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickerProfile {
    /// Side length of the square output canvas.
    pub side: u32,

    /// Style used when a request does not name one.
    pub default_style: StyleId,

    /// Largest accepted input width or height.
    pub max_input_dimension: u32,

    /// Filter used when resizing onto the canvas.
    pub resampling: Resampling,

    /// Fraction of the canvas a padded image may fill (0.0 exclusive to 1.0).
    pub padding_margin: f32,

    /// Fill color for styles with an opaque background.
    pub background_color: [u8; 3],

    /// Per-style constants.
    pub styles: StyleSettings,
}

impl Default for StickerProfile {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            default_style: StyleId::default(),
            max_input_dimension: DEFAULT_MAX_INPUT_DIMENSION,
            resampling: Resampling::default(),
            padding_margin: 1.0,
            background_color: [255, 255, 255],
            styles: StyleSettings::default(),
        }
    }
}

impl StickerProfile {
    /// Creates a profile with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_side(mut self, side: u32) -> Self {
        self.side = side;
        self
    }

    pub fn with_default_style(mut self, style: StyleId) -> Self {
        self.default_style = style;
        self
    }

    pub fn with_max_input_dimension(mut self, max: u32) -> Self {
        self.max_input_dimension = max;
        self
    }

    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn with_padding_margin(mut self, margin: f32) -> Self {
        self.padding_margin = margin;
        self
    }

    pub fn with_background_color(mut self, rgb: [u8; 3]) -> Self {
        self.background_color = rgb;
        self
    }

    /// Sets the brightness threshold of the no-background chroma key.
    pub fn with_chroma_key_threshold(mut self, threshold: u8) -> Self {
        self.styles.no_background.threshold = threshold;
        self
    }

    pub fn with_styles(mut self, styles: StyleSettings) -> Self {
        self.styles = styles;
        self
    }

    /// Checks that the profile describes a usable pipeline.
    pub fn validate(&self) -> Result<(), StickerError> {
        if self.side == 0 {
            return Err(StickerError::InvalidConfig("side must be positive".into()));
        }
        if self.max_input_dimension == 0 {
            return Err(StickerError::InvalidConfig(
                "maxInputDimension must be positive".into(),
            ));
        }
        if !(self.padding_margin > 0.0 && self.padding_margin <= 1.0) {
            return Err(StickerError::InvalidConfig(format!(
                "paddingMargin must be within (0, 1], got {}",
                self.padding_margin
            )));
        }
        self.styles.validate()
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Sticker rendering engine tying the pipeline stages together.

use tracing::{info, warn};

use crate::buffer::PixelBuffer;
use crate::canvas::{self, Background, CanvasSpec};
use crate::codec;
use crate::error::StickerError;
use crate::profile::StickerProfile;
use crate::session::Session;
use crate::style::{StyleId, StyleSettings};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`StickerProfile`].
pub trait Configurable {
    /// Applies a profile's settings, rejecting invalid profiles.
    fn apply_profile(&mut self, profile: &StickerProfile) -> Result<(), StickerError>;

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> StickerProfile;
}

// ============================================================================
// StickerResult
// ============================================================================

/// A finished sticker: PNG bytes plus what produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerResult {
    png: Vec<u8>,
    canvas: CanvasSpec,
    style: StyleId,
}

impl StickerResult {
    /// File name the sticker is delivered under.
    pub const FILE_NAME: &'static str = "sticker.png";

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    pub fn style(&self) -> StyleId {
        self.style
    }
}

// ============================================================================
// StickerMaker
// ============================================================================

/// Main sticker rendering engine.
///
/// Runs decode → style → compose → encode for one photo at a time. The
/// maker holds only configuration, so a shared reference can serve many
/// requests on different threads.
///
/// # Example
///
/// ```
/// use sticker_forge::{PixelBuffer, StickerMaker, StickerProfile, StyleId, encode_png};
///
/// let maker = StickerMaker::new(StickerProfile::new().with_side(64)).unwrap();
///
/// let photo = encode_png(&PixelBuffer::filled(80, 40, &[200, 80, 40]).unwrap()).unwrap();
/// let sticker = maker.make_sticker(&photo, StyleId::Vintage).unwrap();
///
/// assert_eq!(sticker.canvas().side, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StickerMaker {
    side: u32,
    default_style: StyleId,
    max_input_dimension: u32,
    resampling: canvas::Resampling,
    padding_margin: f32,
    background_color: [u8; 3],
    styles: StyleSettings,
}

impl StickerMaker {
    /// Creates a maker from a profile, failing fast on invalid settings.
    pub fn new(profile: StickerProfile) -> Result<Self, StickerError> {
        profile.validate()?;
        Ok(Self::from_valid_profile(profile))
    }

    fn from_valid_profile(profile: StickerProfile) -> Self {
        Self {
            side: profile.side,
            default_style: profile.default_style,
            max_input_dimension: profile.max_input_dimension,
            resampling: profile.resampling,
            padding_margin: profile.padding_margin,
            background_color: profile.background_color,
            styles: profile.styles,
        }
    }

    pub fn default_style(&self) -> StyleId {
        self.default_style
    }

    /// Per-style constants. Changes go through
    /// [`apply_profile`](Configurable::apply_profile) so they are validated.
    pub fn styles(&self) -> &StyleSettings {
        &self.styles
    }

    /// Canvas used for `style` under the current settings.
    pub fn canvas_for(&self, style: StyleId) -> CanvasSpec {
        let background = if style.transparent_background() {
            Background::Transparent
        } else {
            Background::Opaque(self.background_color)
        };
        CanvasSpec::new(self.side, background, style.fit_mode())
            .with_resampling(self.resampling)
            .with_margin(self.padding_margin)
    }

    /// Decodes `input`, applies `style`, composes and encodes the sticker.
    pub fn make_sticker(
        &self,
        input: &[u8],
        style: StyleId,
    ) -> Result<StickerResult, StickerError> {
        let result = self.render(input, style);
        match &result {
            Ok(sticker) => info!(
                %style,
                side = sticker.canvas.side,
                bytes = sticker.png.len(),
                "Sticker ready"
            ),
            Err(e) => warn!(%style, kind = e.kind(), "Sticker failed: {e}"),
        }
        result
    }

    /// Like [`make_sticker`](Self::make_sticker), with the style given as a
    /// slug or keyboard label.
    pub fn make_sticker_from_slug(
        &self,
        input: &[u8],
        style: &str,
    ) -> Result<StickerResult, StickerError> {
        let style = style.parse()?;
        self.make_sticker(input, style)
    }

    /// Renders the photo a session is waiting for.
    ///
    /// Returns `None` when the session has no pending request. The session
    /// goes back to idle whether or not rendering succeeds.
    pub fn make_for_session(
        &self,
        session: &mut Session,
        input: &[u8],
    ) -> Option<Result<StickerResult, StickerError>> {
        let style = session.take_request(self.default_style)?;
        Some(self.make_sticker(input, style))
    }

    /// Runs the style and compositor stages on an already decoded image.
    pub fn render_buffer(&self, image: PixelBuffer, style: StyleId) -> PixelBuffer {
        let styled = self.styles.apply(style, image);
        canvas::compose(styled, &self.canvas_for(style))
    }

    fn render(&self, input: &[u8], style: StyleId) -> Result<StickerResult, StickerError> {
        let image = codec::decode(input, self.max_input_dimension)?;
        let canvas = self.canvas_for(style);
        let composed = self.render_buffer(image, style);
        let png = codec::encode_png(&composed)?;
        Ok(StickerResult { png, canvas, style })
    }
}

impl Default for StickerMaker {
    fn default() -> Self {
        Self::from_valid_profile(StickerProfile::default())
    }
}

impl Configurable for StickerMaker {
    /// Replaces every setting with the profile's. An invalid profile leaves
    /// the maker unchanged.
    fn apply_profile(&mut self, profile: &StickerProfile) -> Result<(), StickerError> {
        *self = Self::new(profile.clone())?;
        Ok(())
    }

    fn export_profile(&self) -> StickerProfile {
        StickerProfile {
            side: self.side,
            default_style: self.default_style,
            max_input_dimension: self.max_input_dimension,
            resampling: self.resampling,
            padding_margin: self.padding_margin,
            background_color: self.background_color,
            styles: self.styles.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

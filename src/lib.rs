//! sticker-forge: turns photos into square PNG stickers
//!
//! The pipeline decodes an input photo, applies one of a fixed set of
//! visual styles, composes the result onto a square canvas and encodes it
//! as PNG.
//!
//! # Example
//!
//! ```
//! use sticker_forge::{PixelBuffer, StickerMaker, StickerProfile, StyleId, encode_png};
//!
//! let maker = StickerMaker::new(StickerProfile::new().with_side(128)).unwrap();
//!
//! // Any JPEG/PNG/WebP bytes work; build a tiny PNG here.
//! let photo = encode_png(&PixelBuffer::filled(200, 100, &[30, 140, 220]).unwrap()).unwrap();
//!
//! let sticker = maker.make_sticker(&photo, StyleId::Cartoon).unwrap();
//! assert_eq!(sticker.canvas().side, 128);
//! ```
//!
//! # Conversation state
//!
//! Chat front ends keep a [`Session`] per user and let the maker consume it:
//!
//! ```
//! use sticker_forge::{PixelBuffer, Session, StickerMaker, StyleId, encode_png};
//!
//! let maker = StickerMaker::default();
//! let mut session = Session::new();
//! let photo = encode_png(&PixelBuffer::filled(16, 16, &[0, 0, 0]).unwrap()).unwrap();
//!
//! // A photo before a style is picked is not rendered.
//! assert!(maker.make_for_session(&mut session, &photo).is_none());
//!
//! session.select_style(StyleId::Outline);
//! let sticker = maker.make_for_session(&mut session, &photo).unwrap().unwrap();
//! assert_eq!(sticker.style(), StyleId::Outline);
//! ```

mod buffer;
mod canvas;
mod codec;
mod error;
mod maker;
mod profile;
mod session;
pub mod style;

pub use buffer::{ColorModel, PixelBuffer, SizePx};
pub use canvas::{
    Background, CanvasSpec, DEFAULT_SIDE, FitMode, Resampling, centered_square, compose,
    fitted_size,
};
pub use codec::{DEFAULT_MAX_INPUT_DIMENSION, decode, encode_png};
pub use error::{DecodeError, StickerError};
pub use maker::{Configurable, StickerMaker, StickerResult};
pub use profile::StickerProfile;
pub use session::{Session, SessionState, help_text, style_menu};
pub use style::{StyleEffect, StyleId, StyleSettings};

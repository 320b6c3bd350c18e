//! Error types for the sticker pipeline.
//!
//! Every stage reports failures through [`StickerError`]. Callers classify a
//! failure by matching on the variant; none of them are retried internally.

/// Why an input could not be turned into a [`PixelBuffer`](crate::PixelBuffer).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("input is empty")]
    Empty,

    #[error("unrecognized image format")]
    UnrecognizedFormat,

    #[error("image is {width}x{height}, larger than the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("malformed image data: {0}")]
    Malformed(String),
}

/// Unified error type for decoding, styling, composing and encoding.
#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("unsupported style: {0:?}")]
    UnsupportedStyle(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StickerError {
    /// Short machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            StickerError::Decode(_) => "decode",
            StickerError::UnsupportedStyle(_) => "unsupported-style",
            StickerError::Encode(_) => "encode",
            StickerError::InvalidBuffer(_) => "invalid-buffer",
            StickerError::InvalidConfig(_) => "invalid-config",
        }
    }
}

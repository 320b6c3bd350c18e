//! In-memory raster type shared by every pipeline stage.
//!
//! A [`PixelBuffer`] is always 8 bits per channel, either RGB or RGBA, and
//! never has a zero dimension. Constructors enforce this, so the styles and
//! the compositor can treat every buffer they receive as valid.

use image::{GrayImage, Luma, RgbImage, Rgba, RgbaImage};

use crate::error::StickerError;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    Rgb,
    Rgba,
}

impl ColorModel {
    /// Number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            ColorModel::Rgb => 3,
            ColorModel::Rgba => 4,
        }
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// The longer of the two sides.
    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// The shorter of the two sides.
    pub fn shortest_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Raster {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// A row-major 8-bit raster with an explicit color model.
///
/// The byte length is always `width * height * channels`. Reading a pixel
/// outside the image is a contract violation and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    raster: Raster,
}

impl PixelBuffer {
    /// Builds a buffer from raw row-major bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        model: ColorModel,
        data: Vec<u8>,
    ) -> Result<Self, StickerError> {
        check_dimensions(width, height)?;

        let expected = width as usize * height as usize * model.channels();
        if data.len() != expected {
            return Err(StickerError::InvalidBuffer(format!(
                "{width}x{height} {model:?} needs {expected} bytes, got {}",
                data.len()
            )));
        }

        // Length was checked above, so from_raw cannot reject the data.
        let raster = match model {
            ColorModel::Rgb => RgbImage::from_raw(width, height, data).map(Raster::Rgb),
            ColorModel::Rgba => RgbaImage::from_raw(width, height, data).map(Raster::Rgba),
        };
        raster
            .map(|raster| Self { raster })
            .ok_or_else(|| StickerError::InvalidBuffer("buffer too small".into()))
    }

    /// Wraps an RGB image, rejecting zero-area images.
    pub fn from_rgb(image: RgbImage) -> Result<Self, StickerError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Self::rgb(image))
    }

    /// Wraps an RGBA image, rejecting zero-area images.
    pub fn from_rgba(image: RgbaImage) -> Result<Self, StickerError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Self::rgba(image))
    }

    /// A buffer where every pixel is `color`. The color model follows the
    /// slice length (3 or 4 bytes).
    pub fn filled(width: u32, height: u32, color: &[u8]) -> Result<Self, StickerError> {
        match *color {
            [r, g, b] => {
                Self::from_rgb(RgbImage::from_pixel(width, height, image::Rgb([r, g, b])))
            }
            [r, g, b, a] => {
                Self::from_rgba(RgbaImage::from_pixel(width, height, Rgba([r, g, b, a])))
            }
            _ => Err(StickerError::InvalidBuffer(format!(
                "fill color must have 3 or 4 channels, got {}",
                color.len()
            ))),
        }
    }

    // Internal constructors for images derived from an existing buffer,
    // which already satisfy the non-zero invariant.
    pub(crate) fn rgb(image: RgbImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self {
            raster: Raster::Rgb(image),
        }
    }

    pub(crate) fn rgba(image: RgbaImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self {
            raster: Raster::Rgba(image),
        }
    }

    pub fn width(&self) -> u32 {
        match &self.raster {
            Raster::Rgb(img) => img.width(),
            Raster::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match &self.raster {
            Raster::Rgb(img) => img.height(),
            Raster::Rgba(img) => img.height(),
        }
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.width(), self.height())
    }

    pub fn model(&self) -> ColorModel {
        match &self.raster {
            Raster::Rgb(_) => ColorModel::Rgb,
            Raster::Rgba(_) => ColorModel::Rgba,
        }
    }

    pub fn channels(&self) -> usize {
        self.model().channels()
    }

    pub fn has_alpha(&self) -> bool {
        self.model() == ColorModel::Rgba
    }

    /// The raw row-major bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.raster {
            Raster::Rgb(img) => img.as_raw(),
            Raster::Rgba(img) => img.as_raw(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self.raster {
            Raster::Rgb(img) => img.into_raw(),
            Raster::Rgba(img) => img.into_raw(),
        }
    }

    /// The channel values of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width(),
            self.height()
        );
        let channels = self.channels();
        let start = (y as usize * self.width() as usize + x as usize) * channels;
        &self.as_bytes()[start..start + channels]
    }

    /// Copies the color channels into an RGB image, dropping alpha.
    pub fn to_rgb8(&self) -> RgbImage {
        match &self.raster {
            Raster::Rgb(img) => img.clone(),
            Raster::Rgba(img) => image::DynamicImage::ImageRgba8(img.clone()).into_rgb8(),
        }
    }

    /// Copies into an RGBA image; RGB pixels become fully opaque.
    pub fn to_rgba8(&self) -> RgbaImage {
        self.clone().into_rgba8()
    }

    pub fn into_rgba8(self) -> RgbaImage {
        match self.raster {
            Raster::Rgb(img) => image::DynamicImage::ImageRgb8(img).into_rgba8(),
            Raster::Rgba(img) => img,
        }
    }

    /// Converts to the RGBA color model, leaving RGBA buffers untouched.
    pub fn into_rgba(self) -> PixelBuffer {
        Self::rgba(self.into_rgba8())
    }

    /// Splits into color channels and, for RGBA buffers, the alpha plane.
    pub(crate) fn into_color_and_alpha(self) -> (RgbImage, Option<GrayImage>) {
        match self.raster {
            Raster::Rgb(img) => (img, None),
            Raster::Rgba(img) => {
                let (width, height) = img.dimensions();
                let mut color = RgbImage::new(width, height);
                let mut alpha = GrayImage::new(width, height);
                for (x, y, pixel) in img.enumerate_pixels() {
                    let [r, g, b, a] = pixel.0;
                    color.put_pixel(x, y, image::Rgb([r, g, b]));
                    alpha.put_pixel(x, y, Luma([a]));
                }
                (color, Some(alpha))
            }
        }
    }

    /// Inverse of [`into_color_and_alpha`](Self::into_color_and_alpha).
    pub(crate) fn from_color_and_alpha(color: RgbImage, alpha: Option<GrayImage>) -> Self {
        match alpha {
            None => Self::rgb(color),
            Some(alpha) => {
                let mut out = RgbaImage::new(color.width(), color.height());
                for (x, y, pixel) in out.enumerate_pixels_mut() {
                    let [r, g, b] = color.get_pixel(x, y).0;
                    *pixel = Rgba([r, g, b, alpha.get_pixel(x, y)[0]]);
                }
                Self::rgba(out)
            }
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), StickerError> {
    if width == 0 || height == 0 {
        return Err(StickerError::InvalidBuffer(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_px_helpers() {
        let size = SizePx::new(640, 480);
        assert!(!size.is_square());
        assert_eq!(size.longest_side(), 640);
        assert_eq!(size.shortest_side(), 480);
        assert!(SizePx::new(5, 5).is_square());
    }

    #[test]
    fn from_raw_checks_length() {
        let ok = PixelBuffer::from_raw(2, 1, ColorModel::Rgb, vec![0; 6]).unwrap();
        assert_eq!(ok.dimensions(), SizePx::new(2, 1));
        assert_eq!(ok.channels(), 3);

        let err = PixelBuffer::from_raw(2, 1, ColorModel::Rgba, vec![0; 6]).unwrap_err();
        assert!(matches!(err, StickerError::InvalidBuffer(_)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(PixelBuffer::from_raw(0, 4, ColorModel::Rgb, vec![]).is_err());
        assert!(PixelBuffer::from_rgba(RgbaImage::new(3, 0)).is_err());
        assert!(PixelBuffer::filled(0, 0, &[1, 2, 3]).is_err());
    }

    #[test]
    fn pixel_reads_row_major() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buf = PixelBuffer::from_raw(2, 2, ColorModel::Rgb, data).unwrap();
        assert_eq!(buf.pixel(0, 0), &[1, 2, 3]);
        assert_eq!(buf.pixel(1, 0), &[4, 5, 6]);
        assert_eq!(buf.pixel(0, 1), &[7, 8, 9]);
        assert_eq!(buf.pixel(1, 1), &[10, 11, 12]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn pixel_out_of_range_panics() {
        let buf = PixelBuffer::filled(2, 2, &[0, 0, 0]).unwrap();
        buf.pixel(2, 0);
    }

    #[test]
    fn rgb_to_rgba_is_opaque() {
        let buf = PixelBuffer::filled(3, 2, &[10, 20, 30]).unwrap().into_rgba();
        assert_eq!(buf.model(), ColorModel::Rgba);
        assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(buf.pixel(2, 1), &[10, 20, 30, 255]);
    }

    #[test]
    fn color_alpha_split_roundtrips() {
        let buf = PixelBuffer::from_raw(
            2,
            1,
            ColorModel::Rgba,
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        )
        .unwrap();
        let (color, alpha) = buf.clone().into_color_and_alpha();
        assert_eq!(color.get_pixel(1, 0).0, [5, 6, 7]);
        assert_eq!(alpha.as_ref().unwrap().get_pixel(0, 0)[0], 4);
        assert_eq!(PixelBuffer::from_color_and_alpha(color, alpha), buf);
    }
}

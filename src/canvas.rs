//! Square canvas composition.
//!
//! [`compose`] maps a styled [`PixelBuffer`] of any size onto an RGBA
//! canvas of exactly `side x side` pixels, either by cropping the largest
//! centered square or by scaling to fit and padding the remainder.
//!
//! ```text
//!  CropToSquare                 FitWithPadding
//!  ┌──┬────────┬──┐             ┌──────────────┐
//!  │  │ keep   │  │  ──►  ■     │ background   │
//!  │  │        │  │             ├──────────────┤
//!  └──┴────────┴──┘             │  image       │
//!                               ├──────────────┤
//!                               │ background   │
//!                               └──────────────┘
//! ```

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;

/// Default sticker side, in pixels.
pub const DEFAULT_SIDE: u32 = 512;

// ============================================================================
// Canvas configuration
// ============================================================================

/// How a non-square image is mapped onto the square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Crop the largest centered square, then resize it to the canvas.
    CropToSquare,
    /// Scale to fit inside the canvas and pad the rest with the background.
    FitWithPadding,
}

/// What shows behind the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Solid RGB fill.
    Opaque([u8; 3]),
    /// Fully transparent.
    Transparent,
}

impl Background {
    fn pixel(self) -> Rgba<u8> {
        match self {
            Background::Opaque([r, g, b]) => Rgba([r, g, b, 255]),
            Background::Transparent => Rgba([0, 0, 0, 0]),
        }
    }
}

/// Resampling filter used when resizing onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Resampling {
    Nearest,
    Triangle,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl From<Resampling> for FilterType {
    fn from(value: Resampling) -> Self {
        match value {
            Resampling::Nearest => FilterType::Nearest,
            Resampling::Triangle => FilterType::Triangle,
            Resampling::CatmullRom => FilterType::CatmullRom,
            Resampling::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Full description of the target canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    /// Side length of the square output.
    pub side: u32,
    pub background: Background,
    pub fit: FitMode,
    pub resampling: Resampling,
    /// Fraction of the side the image may occupy in
    /// [`FitMode::FitWithPadding`] (0.0 exclusive to 1.0).
    pub margin: f32,
}

impl CanvasSpec {
    /// A canvas with the default filter and no extra margin.
    pub fn new(side: u32, background: Background, fit: FitMode) -> Self {
        Self {
            side,
            background,
            fit,
            resampling: Resampling::default(),
            margin: 1.0,
        }
    }

    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    /// Sets the padding margin, clamped to `0.01..=1.0`.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.clamp(0.01, 1.0);
        self
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Composes `image` onto the canvas described by `spec`.
///
/// The result is always RGBA and exactly `spec.side` pixels square.
pub fn compose(image: PixelBuffer, spec: &CanvasSpec) -> PixelBuffer {
    let side = spec.side.max(1);
    let (width, height) = (image.width(), image.height());
    debug!(width, height, side, fit = ?spec.fit, "Composing canvas");

    let canvas = match spec.fit {
        FitMode::CropToSquare => crop_to_square(image.into_rgba8(), side, spec),
        FitMode::FitWithPadding => fit_with_padding(image.into_rgba8(), side, spec),
    };

    debug_assert_eq!(canvas.dimensions(), (side, side));
    PixelBuffer::rgba(canvas)
}

/// Offset and size of the largest square centered in a `width x height` image.
pub fn centered_square(width: u32, height: u32) -> (u32, u32, u32) {
    let size = width.min(height);
    ((width - size) / 2, (height - size) / 2, size)
}

/// Size an image takes after scaling its longer side to `target`.
pub fn fitted_size(width: u32, height: u32, target: u32) -> (u32, u32) {
    let scale = target as f64 / width.max(height) as f64;
    let fit = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, target.max(1));
    (fit(width), fit(height))
}

fn crop_to_square(img: RgbaImage, side: u32, spec: &CanvasSpec) -> RgbaImage {
    let (x, y, size) = centered_square(img.width(), img.height());
    let square = if img.width() == img.height() {
        img
    } else {
        imageops::crop_imm(&img, x, y, size, size).to_image()
    };

    let square = flatten(square, spec.background);
    if size == side {
        square
    } else {
        imageops::resize(&square, side, side, spec.resampling.into())
    }
}

fn fit_with_padding(img: RgbaImage, side: u32, spec: &CanvasSpec) -> RgbaImage {
    let target = ((side as f32 * spec.margin.clamp(0.01, 1.0)).round() as u32).clamp(1, side);
    let (new_w, new_h) = fitted_size(img.width(), img.height(), target);

    let img = flatten(img, spec.background);
    let resized = if (new_w, new_h) == img.dimensions() {
        img
    } else {
        imageops::resize(&img, new_w, new_h, spec.resampling.into())
    };

    let x = ((side - new_w) / 2) as i64;
    let y = ((side - new_h) / 2) as i64;
    let mut canvas = RgbaImage::from_pixel(side, side, spec.background.pixel());
    imageops::replace(&mut canvas, &resized, x, y);
    canvas
}

/// Composites `img` over an opaque background before any resampling, so
/// transparent pixels never blend their hidden color into edges.
fn flatten(img: RgbaImage, background: Background) -> RgbaImage {
    match background {
        Background::Transparent => img,
        Background::Opaque(_) => {
            let mut canvas = RgbaImage::from_pixel(img.width(), img.height(), background.pixel());
            imageops::overlay(&mut canvas, &img, 0, 0);
            canvas
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorModel;
    use proptest::prelude::*;

    const WHITE: Background = Background::Opaque([255, 255, 255]);

    fn crop_nearest(side: u32) -> CanvasSpec {
        CanvasSpec::new(side, WHITE, FitMode::CropToSquare).with_resampling(Resampling::Nearest)
    }

    #[test]
    fn centered_square_offsets() {
        assert_eq!(centered_square(4, 2), (1, 0, 2));
        assert_eq!(centered_square(3, 7), (0, 2, 3));
        assert_eq!(centered_square(5, 5), (0, 0, 5));
    }

    #[test]
    fn fitted_size_keeps_aspect() {
        assert_eq!(fitted_size(1000, 500, 512), (512, 256));
        assert_eq!(fitted_size(30, 90, 512), (171, 512));
        assert_eq!(fitted_size(10_000, 1, 512), (512, 1));
    }

    #[test]
    fn crop_of_checkerboard_replicates_blocks() {
        // 4x2 checkerboard: A B A B / B A B A. The centered 2x2 is columns 1..3.
        let a = [255, 0, 0];
        let b = [0, 0, 255];
        let mut data = Vec::new();
        for row in [[a, b, a, b], [b, a, b, a]] {
            for px in row {
                data.extend_from_slice(&px);
            }
        }
        let input = PixelBuffer::from_raw(4, 2, ColorModel::Rgb, data).unwrap();

        let out = compose(input, &crop_nearest(4));
        assert_eq!(out.model(), ColorModel::Rgba);
        assert_eq!((out.width(), out.height()), (4, 4));

        // Crop is  B A / A B, each pixel becomes a 2x2 block.
        let expected = [[b, b, a, a], [b, b, a, a], [a, a, b, b], [a, a, b, b]];
        for (y, row) in expected.iter().enumerate() {
            for (x, rgb) in row.iter().enumerate() {
                let px = out.pixel(x as u32, y as u32);
                assert_eq!(&px[..3], rgb, "pixel ({x}, {y})");
                assert_eq!(px[3], 255);
            }
        }
    }

    #[test]
    fn crop_discards_outside_columns() {
        // Columns 0 and 4 are marked; only the 3 middle columns survive.
        let input = PixelBuffer::from_rgb(image::RgbImage::from_fn(5, 3, |x, _| {
            if x == 0 || x == 4 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 255, 0])
            }
        }))
        .unwrap();
        let out = compose(input, &crop_nearest(6));
        assert!(out.as_bytes().chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
    }

    #[test]
    fn padding_centers_on_transparent_canvas() {
        let input = PixelBuffer::filled(4, 2, &[9, 8, 7, 255]).unwrap();
        let spec = CanvasSpec::new(8, Background::Transparent, FitMode::FitWithPadding)
            .with_resampling(Resampling::Nearest);
        let out = compose(input, &spec);

        assert_eq!((out.width(), out.height()), (8, 8));
        // Image scales to 8x4 and sits on rows 2..6.
        assert_eq!(out.pixel(0, 0), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(7, 1), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(0, 2), &[9, 8, 7, 255]);
        assert_eq!(out.pixel(7, 5), &[9, 8, 7, 255]);
        assert_eq!(out.pixel(3, 6), &[0, 0, 0, 0]);
    }

    #[test]
    fn padding_keeps_partial_alpha_on_transparent_canvas() {
        let input = PixelBuffer::filled(2, 2, &[50, 60, 70, 100]).unwrap();
        let spec = CanvasSpec::new(2, Background::Transparent, FitMode::FitWithPadding);
        let out = compose(input.clone(), &spec);
        assert_eq!(out, input);
    }

    #[test]
    fn opaque_padding_uses_fill_color() {
        let input = PixelBuffer::filled(2, 6, &[0, 0, 0]).unwrap();
        let spec = CanvasSpec::new(6, Background::Opaque([10, 20, 30]), FitMode::FitWithPadding)
            .with_resampling(Resampling::Nearest);
        let out = compose(input, &spec);
        assert_eq!(out.pixel(0, 3), &[10, 20, 30, 255]);
        assert_eq!(out.pixel(3, 3), &[0, 0, 0, 255]);
        assert_eq!(out.pixel(5, 0), &[10, 20, 30, 255]);
    }

    #[test]
    fn margin_leaves_a_border() {
        let input = PixelBuffer::filled(10, 10, &[1, 1, 1]).unwrap();
        let spec = CanvasSpec::new(10, Background::Transparent, FitMode::FitWithPadding)
            .with_resampling(Resampling::Nearest)
            .with_margin(0.6);
        let out = compose(input, &spec);
        assert_eq!(out.pixel(1, 1)[3], 0);
        assert_eq!(out.pixel(2, 2), &[1, 1, 1, 255]);
        assert_eq!(out.pixel(7, 7), &[1, 1, 1, 255]);
        assert_eq!(out.pixel(8, 8)[3], 0);
    }

    #[test]
    fn opaque_crop_flattens_transparency() {
        let input = PixelBuffer::filled(3, 3, &[0, 0, 0, 0]).unwrap();
        let out = compose(input, &crop_nearest(3));
        assert!(out.as_bytes().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn hidden_color_of_transparent_pixels_does_not_fringe() {
        // Transparent black next to opaque white on a white canvas.
        let input = PixelBuffer::from_rgba(image::RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([255, 255, 255, 255])
            }
        }))
        .unwrap();

        for fit in [FitMode::CropToSquare, FitMode::FitWithPadding] {
            let spec = CanvasSpec::new(16, WHITE, fit).with_resampling(Resampling::Lanczos3);
            let out = compose(input.clone(), &spec);
            for px in out.as_bytes().chunks_exact(4) {
                assert!(px[..3].iter().all(|&c| c >= 254), "{fit:?}: {px:?}");
                assert_eq!(px[3], 255);
            }
        }
    }

    proptest! {
        #[test]
        fn output_is_always_square_rgba(
            width in 1u32..64,
            height in 1u32..64,
            side in 1u32..48,
            pad in any::<bool>(),
            transparent in any::<bool>(),
        ) {
            let fit = if pad {
                FitMode::FitWithPadding
            } else {
                FitMode::CropToSquare
            };
            let background = if transparent {
                Background::Transparent
            } else {
                WHITE
            };
            let spec = CanvasSpec::new(side, background, fit).with_resampling(Resampling::Triangle);

            let input = PixelBuffer::filled(width, height, &[120, 130, 140]).unwrap();
            let out = compose(input, &spec);

            prop_assert_eq!(out.model(), ColorModel::Rgba);
            prop_assert_eq!((out.width(), out.height()), (side, side));
            prop_assert_eq!(out.as_bytes().len(), (side * side * 4) as usize);
        }
    }
}

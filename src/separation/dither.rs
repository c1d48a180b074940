//! # Bayer Ordered Dithering
//!
//! Converts a leveled grayscale image to pure black and white by comparing
//! each pixel against a tiled threshold matrix.
//!
//! ## The Bayer Matrix
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//!   ├───┼───┼───┼───┼───┼───┼───┼───┤
//!   ...
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! Matrix values `m` in `0..N²` map to thresholds on the 0-255 scale:
//! `threshold = (m + 0.5) * 256 / N²`. The half-step keeps pure black from
//! ever passing and pure white from ever failing.
//!
//! ## Why ordered, not error diffusion?
//!
//! A duplicator screen wants a stable, spatially local dot pattern. Ordered
//! dithering gives the same dots for the same tone anywhere on the sheet, and
//! does not depend on neighbouring pixels or on the stamp seed. The 4x4
//! matrix gives coarse, punchy dots; 8x8 gives smoother tone.

use image::{Rgba, RgbaImage};
use serde::Deserialize;

/// Bayer 4x4 dithering matrix (values 0-15).
pub const BAYER4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Bayer 8x8 dithering matrix (values 0-63).
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Which threshold matrix to tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BayerMatrix {
    Bayer4,
    #[default]
    Bayer8,
}

impl BayerMatrix {
    /// Side length of the matrix.
    pub fn size(self) -> usize {
        match self {
            BayerMatrix::Bayer4 => 4,
            BayerMatrix::Bayer8 => 8,
        }
    }

    /// Threshold on the 0-255 scale for a pixel position.
    ///
    /// Returns a value in `(0, 256)`, never exactly 0 or 256.
    #[inline]
    pub fn threshold(self, x: u32, y: u32) -> f32 {
        let (m, cells) = match self {
            BayerMatrix::Bayer4 => (BAYER4[(y & 3) as usize][(x & 3) as usize], 16.0),
            BayerMatrix::Bayer8 => (BAYER8[(y & 7) as usize][(x & 7) as usize], 64.0),
        };
        (m as f32 + 0.5) * 256.0 / cells
    }
}

/// Tone adjustment and matrix choice for [`dither`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DitherSettings {
    /// Linear gain applied before thresholding.
    pub gain: f32,
    /// Additive bias (0-255 scale) applied after gain.
    pub bias: f32,
    pub matrix: BayerMatrix,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            gain: 1.0,
            bias: 0.0,
            matrix: BayerMatrix::Bayer8,
        }
    }
}

/// Determine if a pixel stays white (paper) at the given position.
///
/// `value` is the adjusted 0-255 brightness.
#[inline]
pub fn is_white(x: u32, y: u32, value: f32, matrix: BayerMatrix) -> bool {
    value >= matrix.threshold(x, y)
}

/// Dither a grayscale image (the red channel is read) to pure black/white.
/// Alpha is copied unchanged so transparent areas stay transparent.
pub fn dither(img: &RgbaImage, settings: &DitherSettings) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (x, y, src) in img.enumerate_pixels() {
        let value = (src[0] as f32 * settings.gain + settings.bias).clamp(0.0, 255.0);
        let v = if is_white(x, y, value, settings.matrix) {
            255
        } else {
            0
        };
        out.put_pixel(x, y, Rgba([v, v, v, src[3]]));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

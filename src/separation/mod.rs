//! # Image Separation
//!
//! Converts a product photograph into a 1-bit halftone for the secondary
//! ink plate:
//!
//! 1. **Fit** ([`fit`]): letterbox the photo into its target box.
//! 2. **Levels** ([`levels`]): percentile-clipped auto-levels plus gamma,
//!    producing grayscale.
//! 3. **Dither** ([`dither`]): Bayer ordered dithering (4x4 or 8x8) to pure
//!    black and white, alpha preserved.
//!
//! Every stage is deterministic and produces a same-size RGBA image.
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use stampsheet::separation::{self, DitherSettings, LevelsSettings};
//!
//! let photo = RgbaImage::from_pixel(64, 48, Rgba([120, 90, 60, 255]));
//! let halftone =
//!     separation::halftone(&photo, &LevelsSettings::default(), &DitherSettings::default());
//! assert!(halftone.pixels().all(|p| p[0] == 0 || p[0] == 255));
//! ```

pub mod dither;
pub mod fit;
pub mod levels;

use image::RgbaImage;

pub use dither::{BayerMatrix, DitherSettings, dither};
pub use fit::{FitBox, fit_and_place, fit_box, letterbox};
pub use levels::{LevelsSettings, auto_levels, luminance};

/// Levels then dither, without any placement.
pub fn halftone(img: &RgbaImage, levels: &LevelsSettings, dither: &DitherSettings) -> RgbaImage {
    let leveled = auto_levels(img, levels);
    dither::dither(&leveled, dither)
}

//! Percentile-clip auto-levels with gamma.
//!
//! A handful of specular highlights or crushed shadows would otherwise pin
//! the level range to `[0, 255]` and leave the photo flat. Instead the
//! cutoffs come from the luminance histogram:
//!
//! ```text
//! cdf[i] = number of pixels with luminance <= i
//! low    = lowest bin with cdf[i] >  clip_low  * N
//! high   = lowest bin with cdf[i] >= clip_high * N
//! v'     = clamp((v - low) * 255 / (high - low), 0, 255)
//! out    = 255 * (v' / 255) ^ gamma
//! ```
//!
//! When `high <= low` (a flat or near-flat image) the full range is used.

use image::{Rgba, RgbaImage};
use serde::Deserialize;

/// Auto-levels parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelsSettings {
    /// Fraction of darkest pixels clipped to black.
    pub clip_low: f32,
    /// Cumulative fraction at which pixels clip to white.
    pub clip_high: f32,
    /// Gamma applied after the stretch (`< 1` lightens midtones).
    pub gamma: f32,
}

impl Default for LevelsSettings {
    fn default() -> Self {
        Self {
            clip_low: 0.01,
            clip_high: 0.99,
            gamma: 0.9,
        }
    }
}

impl LevelsSettings {
    /// No clipping and no gamma: a pure min/max-free passthrough for
    /// full-range images.
    pub const IDENTITY: Self = Self {
        clip_low: 0.0,
        clip_high: 1.0,
        gamma: 1.0,
    };
}

/// Rec. 709 luminance of a pixel, rounded to a histogram bin.
#[inline]
pub fn luminance(p: &Rgba<u8>) -> u8 {
    let l = 0.2126 * p[0] as f32 + 0.7152 * p[1] as f32 + 0.0722 * p[2] as f32;
    l.round().clamp(0.0, 255.0) as u8
}

/// 256-bin luminance histogram over every pixel.
pub fn histogram(img: &RgbaImage) -> [u64; 256] {
    let mut bins = [0u64; 256];
    for p in img.pixels() {
        bins[luminance(p) as usize] += 1;
    }
    bins
}

/// Compute the `(low, high)` cutoffs for an image.
pub fn cutoffs(img: &RgbaImage, settings: &LevelsSettings) -> (u8, u8) {
    let bins = histogram(img);
    let total = (img.width() as u64 * img.height() as u64) as f64;
    if total == 0.0 {
        return (0, 255);
    }

    let low_target = settings.clip_low as f64 * total;
    let high_target = settings.clip_high as f64 * total;

    let mut cumulative = 0u64;
    let mut low: Option<usize> = None;
    let mut high: Option<usize> = None;
    for (i, &count) in bins.iter().enumerate() {
        cumulative += count;
        let c = cumulative as f64;
        if low.is_none() && c > low_target {
            low = Some(i);
        }
        if high.is_none() && c >= high_target {
            high = Some(i);
        }
        if low.is_some() && high.is_some() {
            break;
        }
    }

    match (low, high) {
        (Some(lo), Some(hi)) if hi > lo => (lo as u8, hi as u8),
        _ => (0, 255),
    }
}

/// Stretch levels and apply gamma. Output is grayscale; alpha unchanged.
pub fn auto_levels(img: &RgbaImage, settings: &LevelsSettings) -> RgbaImage {
    let (low, high) = cutoffs(img, settings);
    let lut = build_lut(low, high, settings.gamma);

    let mut out = RgbaImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let v = lut[luminance(src) as usize];
        *dst = Rgba([v, v, v, src[3]]);
    }
    out
}

fn build_lut(low: u8, high: u8, gamma: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let span = (high as f32 - low as f32).max(1.0);
    for (i, slot) in lut.iter_mut().enumerate() {
        let stretched = ((i as f32 - low as f32) * 255.0 / span).clamp(0.0, 255.0);
        let corrected = 255.0 * (stretched / 255.0).powf(gamma);
        *slot = corrected.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

// ============================================================================
// TESTS
// ============================================================================

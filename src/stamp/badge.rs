//! Category badges, rarity stars and the price medallion.
//!
//! All three are small glyphs drawn in the top band of the stamp. They take
//! no randomness: their appearance depends only on the record.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::target::StampPalette;
use crate::canvas::{ArcMode, Canvas, TextAlign, TextSize, TextStyle};

/// Icon drawn for the primary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Audio,
    Storage,
    Gaming,
    Computing,
    Camera,
    Mobile,
    /// Fallback circle glyph.
    Plain,
}

impl Badge {
    /// Pick the badge for a primary category token (case-insensitive).
    pub fn for_category(category: &str) -> Self {
        let c = category.to_lowercase();
        if c.contains("audio") {
            Badge::Audio
        } else if c.contains("storage") {
            Badge::Storage
        } else if c.contains("gaming") {
            Badge::Gaming
        } else if c.contains("computing") || c.contains("computer") || c.contains("laptop") {
            Badge::Computing
        } else if c.contains("camera") {
            Badge::Camera
        } else if c.contains("mobile") || c.contains("phone") {
            Badge::Mobile
        } else {
            Badge::Plain
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Badge::Audio => "audio",
            Badge::Storage => "storage",
            Badge::Gaming => "gaming",
            Badge::Computing => "computing",
            Badge::Camera => "camera",
            Badge::Mobile => "mobile",
            Badge::Plain => "plain",
        }
    }
}

/// Number of stars for an availability descriptor.
///
/// | Contains | Stars |
/// |----------|-------|
/// | `very rare` | 5 |
/// | `rare` | 4 |
/// | `uncommon` | 3 |
/// | anything else | 2 |
/// | (empty) | 0 |
pub fn rarity_stars(availability: &str) -> usize {
    let a = availability.trim().to_lowercase();
    if a.is_empty() {
        0
    } else if a.contains("very rare") {
        5
    } else if a.contains("rare") {
        4
    } else if a.contains("uncommon") {
        3
    } else {
        2
    }
}

/// Five-pointed star outline centered on `(cx, cy)`.
pub fn star_points(cx: f32, cy: f32, outer: f32, inner: f32) -> Vec<(f32, f32)> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = -FRAC_PI_2 + i as f32 * PI / 5.0;
            (cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// Row of `count` filled stars starting at `(x, cy)`.
pub fn draw_stars(
    canvas: &mut Canvas,
    count: usize,
    x: f32,
    cy: f32,
    size: f32,
    palette: &StampPalette,
) {
    if count == 0 {
        return;
    }
    canvas.push();
    canvas.no_stroke();
    canvas.fill(palette.accent);
    let r = size / 2.0;
    for i in 0..count {
        let cx = x + r + i as f32 * (size + 2.0);
        canvas.polygon(&star_points(cx, cy, r, r * 0.45), true);
    }
    canvas.pop();
}

/// Accent disc with the price knocked out in the background paint.
pub fn draw_medallion(
    canvas: &mut Canvas,
    price: &str,
    cx: f32,
    cy: f32,
    diameter: f32,
    palette: &StampPalette,
) {
    canvas.push();
    canvas.no_stroke();
    canvas.fill(palette.accent);
    canvas.circle(cx, cy, diameter);

    canvas.no_fill();
    canvas.stroke(palette.background);
    canvas.stroke_weight(1.0);
    canvas.circle(cx, cy, diameter - 6.0);

    canvas.fill(palette.background);
    canvas.no_stroke();
    canvas.text_size(TextSize::Small);
    canvas.text_style(TextStyle::Bold);
    canvas.text_align(TextAlign::Center);
    let h = canvas.line_height();
    canvas.text(price, cx, cy - h / 2.0);
    canvas.pop();
}

/// Draw a badge icon inside a `size` square centered on `(cx, cy)`.
pub fn draw_badge(
    canvas: &mut Canvas,
    badge: Badge,
    cx: f32,
    cy: f32,
    size: f32,
    palette: &StampPalette,
) {
    let s = size / 2.0;
    canvas.push();
    canvas.stroke(palette.ink);
    canvas.stroke_weight(1.5);
    canvas.no_fill();
    // Ring shared by every badge.
    canvas.circle(cx, cy, size);

    let u = s * 0.55;
    match badge {
        Badge::Audio => {
            // Cassette: body, two reels.
            canvas.rect(cx - u, cy - u * 0.65, u * 2.0, u * 1.3);
            canvas.circle(cx - u * 0.45, cy - u * 0.1, u * 0.5);
            canvas.circle(cx + u * 0.45, cy - u * 0.1, u * 0.5);
            canvas.line(cx - u * 0.5, cy + u * 0.4, cx + u * 0.5, cy + u * 0.4);
        }
        Badge::Storage => {
            // Floppy: body, shutter, label.
            canvas.rect(cx - u, cy - u, u * 2.0, u * 2.0);
            canvas.fill(palette.ink);
            canvas.rect(cx - u * 0.45, cy - u, u * 0.9, u * 0.7);
            canvas.no_fill();
            canvas.rect(cx - u * 0.6, cy + u * 0.1, u * 1.2, u * 0.7);
        }
        Badge::Gaming => {
            // Controller: body, d-pad, buttons.
            canvas.rect(cx - u, cy - u * 0.5, u * 2.0, u);
            canvas.line(cx - u * 0.7, cy, cx - u * 0.3, cy);
            canvas.line(cx - u * 0.5, cy - u * 0.2, cx - u * 0.5, cy + u * 0.2);
            canvas.fill(palette.ink);
            canvas.circle(cx + u * 0.35, cy, u * 0.25);
            canvas.circle(cx + u * 0.7, cy, u * 0.25);
        }
        Badge::Computing => {
            // Monitor on a stand.
            canvas.rect(cx - u, cy - u * 0.8, u * 2.0, u * 1.2);
            canvas.line(cx, cy + u * 0.4, cx, cy + u * 0.8);
            canvas.line(cx - u * 0.5, cy + u * 0.8, cx + u * 0.5, cy + u * 0.8);
        }
        Badge::Camera => {
            // Body, lens, viewfinder bump.
            canvas.rect(cx - u, cy - u * 0.5, u * 2.0, u * 1.2);
            canvas.circle(cx, cy + u * 0.1, u * 0.8);
            canvas.rect(cx - u * 0.3, cy - u * 0.8, u * 0.6, u * 0.3);
        }
        Badge::Mobile => {
            // Handset with an antenna.
            canvas.rect(cx - u * 0.45, cy - u * 0.7, u * 0.9, u * 1.7);
            canvas.line(cx + u * 0.25, cy - u * 0.7, cx + u * 0.25, cy - u * 1.1);
            canvas.rect(cx - u * 0.3, cy - u * 0.5, u * 0.6, u * 0.5);
        }
        Badge::Plain => {
            canvas.fill(palette.ink);
            canvas.circle(cx, cy, u);
            canvas.no_fill();
            canvas.arc(cx, cy, u * 1.6, 0.0, TAU, ArcMode::Open);
        }
    }
    canvas.pop();
}

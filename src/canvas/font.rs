//! Bitmap text using the Spleen font family.
//!
//! Every glyph of a size has the same advance, so measuring a string is a
//! character count. Bold is a one-pixel double strike, italic a row shear.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

/// Available text sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSize {
    /// 6x12
    Small,
    /// 8x16
    #[default]
    Medium,
    /// 12x24
    Large,
}

impl TextSize {
    pub fn char_width(self) -> usize {
        match self {
            TextSize::Small => 6,
            TextSize::Medium => 8,
            TextSize::Large => 12,
        }
    }

    pub fn line_height(self) -> usize {
        match self {
            TextSize::Small => 12,
            TextSize::Medium => 16,
            TextSize::Large => 24,
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            TextSize::Small => FONT_6X12,
            TextSize::Medium => FONT_8X16,
            TextSize::Large => FONT_12X24,
        }
    }
}

/// Text weight/slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// Width in pixels of `text` set at `size`.
pub fn advance_width(text: &str, size: TextSize, style: TextStyle) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    let extra = if style == TextStyle::Bold { 1 } else { 0 };
    n * size.char_width() + extra
}

/// Emit every inked pixel of `text`, relative to the top-left of the line.
pub fn rasterize<F>(text: &str, size: TextSize, style: TextStyle, mut mark: F)
where
    F: FnMut(i32, i32),
{
    let Ok(mut font) = PSF2Font::new(size.font_data()) else {
        log::warn!("bitmap font {:?} failed to load, skipping text", size);
        return;
    };
    let char_w = size.char_width() as i32;
    let char_h = size.line_height() as i32;
    let mut cursor_x = 0i32;

    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                let shear = match style {
                    TextStyle::Italic => (char_h - 1 - row_y as i32) / 4,
                    _ => 0,
                };
                for (col_x, on) in row.enumerate() {
                    if on {
                        let x = cursor_x + col_x as i32 + shear;
                        mark(x, row_y as i32);
                        if style == TextStyle::Bold {
                            mark(x + 1, row_y as i32);
                        }
                    }
                }
            }
        }
        cursor_x += char_w;
    }
}

//! Render targets: where a composed stamp's marks end up.
//!
//! The composer is written once against [`RenderTarget`]. Two backends:
//!
//! - [`DirectTarget`]: one full-color canvas. Paper, line work and the
//!   photo all land on it.
//! - [`PlateTarget`]: two monochrome ink plates plus a paper preview layer.
//!   Line work is drawn per stamp on a scratch plate and composited onto the
//!   primary plate; photos are halftoned onto the secondary plate. The paper
//!   panel only ever reaches the preview layer.
//!
//! Plates hold black ink on transparency. The ink color is applied only
//! when the combined preview is built.

use image::{Rgba, RgbaImage};

use super::border::MARK_BLEED;
use crate::canvas::{Canvas, Paint};
use crate::config::{Palette, rgba};
use crate::layout::Rect;
use crate::separation::{DitherSettings, LevelsSettings, fit_and_place, letterbox};

/// Colors used by the stamp content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPalette {
    /// Paper panel behind the stamp.
    pub panel: Paint,
    /// Line work and text.
    pub ink: Paint,
    /// Medallion and stars.
    pub accent: Paint,
    /// Circuit traces.
    pub trace: Paint,
    /// "Background colored" marks: perforations, notches, knockouts.
    pub background: Paint,
}

/// How scalloped edges are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScallopStyle {
    /// Outlined bumps (direct color).
    Stroked,
    /// Background-colored dots punched into the frame (ink plates).
    FilledDots,
}

/// Output backend for the stamp composer.
pub trait RenderTarget {
    /// Layer for the paper panel.
    fn paper(&mut self) -> &mut Canvas;

    /// Layer for monochrome content (traces, border, text, badges).
    fn ink(&mut self) -> &mut Canvas;

    fn palette(&self) -> StampPalette;

    fn scallop_style(&self) -> ScallopStyle;

    /// True when `ink()` is a printable plate rather than a color preview.
    fn is_ink_plate_only(&self) -> bool;

    /// Draw a product photo letterboxed into `image_box`.
    fn place_image(&mut self, img: &RgbaImage, image_box: Rect);

    /// Called before any drawing for a stamp occupying `stamp`.
    fn begin_stamp(&mut self, _stamp: Rect) {}

    /// Called after the last drawing call for a stamp.
    fn finish_stamp(&mut self) {}
}

// ============================================================================
// DIRECT COLOR
// ============================================================================

/// Full-color preview target.
#[derive(Debug, Clone)]
pub struct DirectTarget {
    canvas: Canvas,
    palette: StampPalette,
}

impl DirectTarget {
    pub fn new(width: u32, height: u32, palette: &Palette) -> Self {
        Self {
            canvas: Canvas::new(width, height, rgba(palette.sheet)),
            palette: StampPalette {
                panel: Paint::Color(rgba(palette.paper)),
                ink: Paint::Color(rgba(palette.ink)),
                accent: Paint::Color(rgba(palette.accent)),
                trace: Paint::Color(rgba(palette.trace)),
                background: Paint::Color(rgba(palette.paper)),
            },
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas.into_image()
    }
}

impl RenderTarget for DirectTarget {
    fn paper(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn ink(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn palette(&self) -> StampPalette {
        self.palette
    }

    fn scallop_style(&self) -> ScallopStyle {
        ScallopStyle::Stroked
    }

    fn is_ink_plate_only(&self) -> bool {
        false
    }

    fn place_image(&mut self, img: &RgbaImage, image_box: Rect) {
        if let Some((fitted, b)) = letterbox(img, image_box) {
            self.canvas.image_at(&fitted, b.x as f32, b.y as f32);
        }
    }
}

// ============================================================================
// INK PLATES
// ============================================================================

const PLATE_INK: Paint = Paint::Color(Rgba([0, 0, 0, 255]));

/// Two-plate separation target.
#[derive(Debug, Clone)]
pub struct PlateTarget {
    preview: Canvas,
    primary: Canvas,
    secondary: Canvas,
    scratch: Option<(Canvas, i32, i32)>,
    sheet_color: Rgba<u8>,
    panel: Paint,
    levels: LevelsSettings,
    dither: DitherSettings,
}

impl PlateTarget {
    pub fn new(
        width: u32,
        height: u32,
        palette: &Palette,
        levels: LevelsSettings,
        dither: DitherSettings,
    ) -> Self {
        Self {
            preview: Canvas::new(width, height, rgba(palette.sheet)),
            primary: Canvas::ink_plate(width, height),
            secondary: Canvas::ink_plate(width, height),
            scratch: None,
            sheet_color: rgba(palette.sheet),
            panel: Paint::Color(rgba(palette.paper)),
            levels,
            dither,
        }
    }

    /// Clear every layer for a new sheet.
    pub fn reset(&mut self) {
        self.preview.clear(self.sheet_color);
        self.primary.clear(Rgba([0, 0, 0, 0]));
        self.secondary.clear(Rgba([0, 0, 0, 0]));
        self.scratch = None;
    }

    pub fn preview(&self) -> &Canvas {
        &self.preview
    }

    pub fn primary(&self) -> &Canvas {
        &self.primary
    }

    pub fn secondary(&self) -> &Canvas {
        &self.secondary
    }
}

impl RenderTarget for PlateTarget {
    fn paper(&mut self) -> &mut Canvas {
        &mut self.preview
    }

    fn ink(&mut self) -> &mut Canvas {
        match self.scratch {
            Some((ref mut scratch, _, _)) => scratch,
            None => &mut self.primary,
        }
    }

    fn palette(&self) -> StampPalette {
        StampPalette {
            panel: self.panel,
            ink: PLATE_INK,
            accent: PLATE_INK,
            trace: PLATE_INK,
            background: Paint::Erase,
        }
    }

    fn scallop_style(&self) -> ScallopStyle {
        ScallopStyle::FilledDots
    }

    fn is_ink_plate_only(&self) -> bool {
        true
    }

    fn place_image(&mut self, img: &RgbaImage, image_box: Rect) {
        let Some((halftone, b)) = fit_and_place(img, image_box, &self.levels, &self.dither) else {
            return;
        };
        let mut marks = RgbaImage::new(halftone.width(), halftone.height());
        for (src, dst) in halftone.pixels().zip(marks.pixels_mut()) {
            if src[0] == 0 && src[3] >= 128 {
                *dst = Rgba([0, 0, 0, 255]);
            }
        }
        self.secondary.image_at(&marks, b.x as f32, b.y as f32);
    }

    fn begin_stamp(&mut self, stamp: Rect) {
        let x = (stamp.x - MARK_BLEED).floor() as i32;
        let y = (stamp.y - MARK_BLEED).floor() as i32;
        let w = ((stamp.right() + MARK_BLEED).ceil() as i32 - x).max(1) as u32;
        let h = ((stamp.bottom() + MARK_BLEED).ceil() as i32 - y).max(1) as u32;
        let mut scratch = Canvas::ink_plate(w, h);
        scratch.translate(-(x as f32), -(y as f32));
        self.scratch = Some((scratch, x, y));
    }

    fn finish_stamp(&mut self) {
        if let Some((scratch, x, y)) = self.scratch.take() {
            self.primary.composite(&scratch, x, y);
        }
    }
}

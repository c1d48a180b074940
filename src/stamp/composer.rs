//! # Stamp Composer
//!
//! Draws one stamp into a grid cell. The same code drives both the color
//! preview and the ink plates; only the [`RenderTarget`] differs.
//!
//! ## Layout
//!
//! ```text
//! ┌─ cell ───────────────────────────┐
//! │ ┌─ stamp (cell - margin) ──────┐ │
//! │ │ ╔═ frame ══════════════════╗ │ │
//! │ │ ║ ★★★★            (badge)  ║ │ │
//! │ │ ║ ┌─ image box ──────────┐ ║ │ │
//! │ │ ║ │                 ($) │ ║ │ │   traces fill the area above
//! │ │ ║ └──────────────────────┘ ║ │ │   the footer
//! │ │ ║ TITLE                    ║ │ │
//! │ │ ║ 1998–2005                ║ │ │   footer: text block
//! │ │ ║ Japan • Sony             ║ │ │
//! │ │ ╚══════════════════════════╝ │ │
//! │ └──────────────────────────────┘ │
//! └──────────────────────────────────┘
//! ```
//!
//! ## Draw order
//!
//! 1. paper panel
//! 2. circuit traces
//! 3. product image
//! 4. border
//! 5. price medallion
//! 6. rarity stars
//! 7. category badge
//! 8. text block
//!
//! The stamp's random stream is read by the traces and then by the border
//! selector, nothing else. Traces are generated even when hidden so the
//! border does not change when they are toggled.

use image::{Rgba, RgbaImage};

use super::badge::{Badge, draw_badge, draw_medallion, draw_stars, rarity_stars};
use super::border::{BorderStyle, draw_border, frames};
use super::seed::StampRng;
use super::target::RenderTarget;
use super::traces::{draw_traces, generate, trace_count};
use crate::canvas::{Canvas, Paint, TextAlign, TextSize, TextStyle};
use crate::catalog::DeviceRecord;
use crate::layout::{GridCell, Rect};
use crate::grain::GrainField;
use crate::text::wrap;

/// Gap between the cell edge and the stamp panel.
pub const STAMP_MARGIN: f32 = 6.0;
/// Share of the inner frame reserved for the text block.
pub const FOOTER_FRACTION: f32 = 0.42;

const CONTENT_PADDING: f32 = 6.0;
const TOP_BAND: f32 = 24.0;
const STAR_SIZE: f32 = 10.0;
const BADGE_SIZE: f32 = 20.0;
const MEDALLION_DIAMETER: f32 = 40.0;
const TITLE_LINES: usize = 2;
const REASON_LINES: usize = 3;
const GRAIN_STEP: u32 = 3;
const GRAIN_THRESHOLD: f32 = 0.74;
const GRAIN_FREQUENCY: f32 = 0.7;

/// Per-render inputs that are not part of the record.
#[derive(Debug, Clone, Copy)]
pub struct StampContext<'a> {
    pub run_seed: u32,
    pub show_traces: bool,
    /// Decoded product photo, if it loaded.
    pub image: Option<&'a RgbaImage>,
}

/// What the composer decided for a stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampSummary {
    pub border: BorderStyle,
    pub stars: usize,
    pub badge: Badge,
    /// Traces generated (drawn only when visible).
    pub traces: usize,
}

/// Regions of a stamp derived from its cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampLayout {
    pub stamp: Rect,
    pub frame: Rect,
    pub inner: Rect,
    /// Area above the footer where traces run.
    pub trace_area: Rect,
    pub image_box: Rect,
    pub footer: Rect,
}

impl StampLayout {
    pub fn for_cell(cell: &GridCell) -> Self {
        let stamp = cell.rect().inset(STAMP_MARGIN);
        let (frame, inner) = frames(stamp);
        let footer_height = inner.height * FOOTER_FRACTION;
        let footer = Rect::new(
            inner.x,
            inner.bottom() - footer_height,
            inner.width,
            footer_height,
        );
        let trace_area = Rect::new(inner.x, inner.y, inner.width, inner.height - footer_height);
        let image_box = Rect::new(
            inner.x + CONTENT_PADDING,
            inner.y + TOP_BAND,
            (inner.width - 2.0 * CONTENT_PADDING).max(0.0),
            (trace_area.height - TOP_BAND - CONTENT_PADDING).max(0.0),
        );
        Self {
            stamp,
            frame,
            inner,
            trace_area,
            image_box,
            footer,
        }
    }
}

/// Compose one stamp for `record` into `cell`.
pub fn compose_stamp(
    target: &mut dyn RenderTarget,
    record: &DeviceRecord,
    cell: &GridCell,
    ctx: &StampContext<'_>,
) -> StampSummary {
    let layout = StampLayout::for_cell(cell);
    let palette = target.palette();
    let mut rng = StampRng::new(ctx.run_seed, record.identity());

    target.begin_stamp(layout.stamp);

    // 1. Paper panel.
    {
        let paper = target.paper();
        paper.push();
        paper.no_stroke();
        paper.fill(palette.panel);
        let s = layout.stamp;
        paper.rect(s.x, s.y, s.width, s.height);
        paper.pop();
        if let Paint::Color(panel) = palette.panel {
            paper_grain(paper, s, panel, rng.grain_seed());
        }
    }

    // 2. Traces.
    let traces = generate(&mut rng, layout.trace_area, trace_count(record.release_year));
    if ctx.show_traces && !traces.is_empty() {
        draw_traces(target.ink(), &traces, &palette);
    }

    // 3. Image.
    if let Some(img) = ctx.image {
        target.place_image(img, layout.image_box);
    }

    // 4. Border.
    let border = BorderStyle::pick(&mut rng);
    let scallops = target.scallop_style();
    draw_border(target.ink(), border, layout.stamp, &palette, scallops);

    let inner = layout.inner;
    let ink = target.ink();

    // 5. Medallion.
    if let Some(price) = record.display_price() {
        let r = MEDALLION_DIAMETER / 2.0;
        draw_medallion(
            ink,
            &price,
            layout.image_box.right() - r,
            layout.image_box.bottom() - r,
            MEDALLION_DIAMETER,
            &palette,
        );
    }

    // 6. Stars.
    let stars = rarity_stars(&record.availability);
    draw_stars(
        ink,
        stars,
        inner.x + CONTENT_PADDING,
        inner.y + TOP_BAND / 2.0,
        STAR_SIZE,
        &palette,
    );

    // 7. Badge.
    let badge = Badge::for_category(record.primary_category());
    draw_badge(
        ink,
        badge,
        inner.right() - CONTENT_PADDING - BADGE_SIZE / 2.0,
        inner.y + TOP_BAND / 2.0,
        BADGE_SIZE,
        &palette,
    );

    // 8. Text.
    draw_text_block(ink, record, layout.footer, palette.ink);

    target.finish_stamp();

    StampSummary {
        border,
        stars,
        badge,
        traces: traces.len(),
    }
}

/// Sparse darker specks over the panel.
fn paper_grain(canvas: &mut Canvas, area: Rect, panel: Rgba<u8>, seed: u32) {
    let field = GrainField::new(seed, GRAIN_FREQUENCY);
    let speck = Paint::Color(Rgba([
        panel[0].saturating_sub(14),
        panel[1].saturating_sub(14),
        panel[2].saturating_sub(16),
        255,
    ]));
    canvas.push();
    canvas.no_stroke();
    canvas.fill(speck);
    let cols = (area.width.max(0.0) as u32) / GRAIN_STEP;
    let rows = (area.height.max(0.0) as u32) / GRAIN_STEP;
    for gy in 0..rows {
        for gx in 0..cols {
            if field.speck(gx as f32, gy as f32, GRAIN_THRESHOLD) {
                let x = area.x + (gx * GRAIN_STEP) as f32;
                let y = area.y + (gy * GRAIN_STEP) as f32;
                canvas.rect(x, y, 1.0, 1.0);
            }
        }
    }
    canvas.pop();
}

/// Title, year range, origin, form factor and reason, top to bottom.
fn draw_text_block(canvas: &mut Canvas, record: &DeviceRecord, footer: Rect, ink: Paint) {
    let x = footer.x + CONTENT_PADDING;
    let width = (footer.width - 2.0 * CONTENT_PADDING).max(0.0);
    let mut y = footer.y + CONTENT_PADDING;

    canvas.push();
    canvas.no_stroke();
    canvas.fill(ink);
    canvas.text_align(TextAlign::Left);

    canvas.text_size(TextSize::Medium);
    canvas.text_style(TextStyle::Bold);
    let title = wrap(&record.name, width, TITLE_LINES, |s| canvas.text_width(s));
    let lh = canvas.line_height();
    for line in &title {
        canvas.text(line, x, y);
        y += lh;
    }
    y += 4.0;

    canvas.text_size(TextSize::Small);
    canvas.text_style(TextStyle::Regular);
    let lh = canvas.line_height();
    for line in [record.year_range(), record.origin_line()] {
        canvas.text(&line, x, y);
        y += lh;
    }

    if !record.form_factor.is_empty() {
        canvas.text_style(TextStyle::Italic);
        canvas.text(&record.form_factor, x, y);
        y += lh;
        canvas.text_style(TextStyle::Regular);
    }

    y += 2.0;
    let reason = wrap(&record.reason, width, REASON_LINES, |s| canvas.text_width(s));
    for line in &reason {
        canvas.text(line, x, y);
        y += lh;
    }

    canvas.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Palette;
    use crate::layout::Grid;
    use crate::separation::{DitherSettings, LevelsSettings};
    use crate::stamp::target::{DirectTarget, PlateTarget};

    fn record(json: &str) -> DeviceRecord {
        Catalog::from_json_str(json).unwrap().records()[0].clone()
    }

    fn walkman() -> DeviceRecord {
        record(
            r#"[{"name": "Sony Walkman TPS-L2", "manufacturer": "Sony",
                 "years_active": "1979-1984", "original_price": "$150",
                 "region": "Japan", "category": "Audio/Portable",
                 "form_factor": "Cassette player", "availability_today": "Rare",
                 "reason_for_obsolescence": "Replaced by CD players and later MP3"}]"#,
        )
    }

    fn cell() -> GridCell {
        *Grid::new(0.0, 0.0, 300.0, 460.0, 1, 1, 0.0, 0.0)
            .unwrap()
            .cell_at(0)
            .unwrap()
    }

    fn ctx(show_traces: bool) -> StampContext<'static> {
        StampContext {
            run_seed: 42,
            show_traces,
            image: None,
        }
    }

    #[test]
    fn test_layout_nests() {
        let l = StampLayout::for_cell(&cell());
        assert!(l.inner.x > l.frame.x && l.frame.x > l.stamp.x);
        assert!(l.image_box.bottom() <= l.footer.y);
        assert!((l.footer.height - l.inner.height * FOOTER_FRACTION).abs() < 1e-3);
        assert!((l.footer.bottom() - l.inner.bottom()).abs() < 1e-3);
    }

    #[test]
    fn test_summary() {
        let mut t = DirectTarget::new(300, 460, &Palette::default());
        let s = compose_stamp(&mut t, &walkman(), &cell(), &ctx(true));
        assert_eq!(s.stars, 4);
        assert_eq!(s.badge, Badge::Audio);
        assert_eq!(s.traces, trace_count(Some(1979)));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let render = || {
            let mut t = DirectTarget::new(300, 460, &Palette::default());
            compose_stamp(&mut t, &walkman(), &cell(), &ctx(true));
            t.into_image()
        };
        assert!(render() == render());
    }

    #[test]
    fn test_trace_toggle_keeps_border() {
        let mut a = DirectTarget::new(300, 460, &Palette::default());
        let mut b = DirectTarget::new(300, 460, &Palette::default());
        let on = compose_stamp(&mut a, &walkman(), &cell(), &ctx(true));
        let off = compose_stamp(&mut b, &walkman(), &cell(), &ctx(false));
        assert_eq!(on.border, off.border);
        assert_ne!(a.canvas().image().as_raw(), b.canvas().image().as_raw());
    }

    #[test]
    fn test_unknown_year_has_no_traces() {
        let r = record(r#"[{"name": "Mystery Box"}]"#);
        let mut a = DirectTarget::new(300, 460, &Palette::default());
        let mut b = DirectTarget::new(300, 460, &Palette::default());
        let s = compose_stamp(&mut a, &r, &cell(), &ctx(true));
        compose_stamp(&mut b, &r, &cell(), &ctx(false));
        assert_eq!(s.traces, 0);
        assert_eq!(s.stars, 0);
        assert_eq!(s.badge, Badge::Plain);
        assert!(a.canvas().image() == b.canvas().image());
    }

    #[test]
    fn test_direct_and_plates_pick_same_border() {
        let mut d = DirectTarget::new(300, 460, &Palette::default());
        let mut p = PlateTarget::new(
            300,
            460,
            &Palette::default(),
            LevelsSettings::default(),
            DitherSettings::default(),
        );
        let a = compose_stamp(&mut d, &walkman(), &cell(), &ctx(true));
        let b = compose_stamp(&mut p, &walkman(), &cell(), &ctx(true));
        assert_eq!(a, b);
    }

    #[test]
    fn test_plate_keeps_tick_ends_past_stamp_edge() {
        let mut d = DirectTarget::new(300, 460, &Palette::default());
        let mut p = PlateTarget::new(
            300,
            460,
            &Palette::default(),
            LevelsSettings::default(),
            DitherSettings::default(),
        );
        compose_stamp(&mut d, &walkman(), &cell(), &ctx(true));
        compose_stamp(&mut p, &walkman(), &cell(), &ctx(true));

        // The top-left ticks leave the frame corner at (14, 14) and end
        // left of and above the stamp edge at 6.
        let sheet = *d.canvas().image().get_pixel(0, 0);
        let flips: [fn(u32, u32) -> (u32, u32); 2] = [|a, b| (a, b), |a, b| (b, a)];
        for flip in flips {
            let region: Vec<(u32, u32)> = (2..6)
                .flat_map(|a| (10..19).map(move |b| flip(a, b)))
                .collect();
            let direct = d.canvas().image();
            let plate = p.primary().image();
            assert!(region.iter().any(|&(x, y)| *direct.get_pixel(x, y) != sheet));
            assert!(region.iter().any(|&(x, y)| plate.get_pixel(x, y)[3] > 0));
        }
    }

    #[test]
    fn test_plate_output_is_monochrome() {
        let mut p = PlateTarget::new(
            300,
            460,
            &Palette::default(),
            LevelsSettings::default(),
            DitherSettings::default(),
        );
        let photo = RgbaImage::from_fn(32, 32, |x, y| {
            let v = ((x + y) * 4) as u8;
            Rgba([v, v, v, 255])
        });
        let ctx = StampContext {
            run_seed: 1,
            show_traces: true,
            image: Some(&photo),
        };
        compose_stamp(&mut p, &walkman(), &cell(), &ctx);
        for plate in [p.primary(), p.secondary()] {
            assert!(plate.image().pixels().any(|px| px[3] > 0));
            assert!(
                plate
                    .image()
                    .pixels()
                    .all(|px| px[3] == 0 || (px[0] == 0 && px[1] == 0 && px[2] == 0))
            );
        }
    }
}

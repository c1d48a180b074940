//! # Stamp Borders
//!
//! Four procedural edge decorations. Every style shares the same skeleton:
//!
//! ```text
//!  stamp ┌──────────────────────────┐
//!        │  frame ╔══════════════╗  │   outer frame: 3px stroke
//!        │        ║ inner ┌────┐ ║  │   inner frame: 1.5px stroke
//!        │        ║       │    │ ║  │
//!        │        ║       └────┘ ║  │
//!        │        ╚══════════════╝  │
//!        └──────────────────────────┘
//! ```
//!
//! plus 8 registration ticks (two per corner). The style then decorates
//! the outer frame's edges:
//!
//! | Style | Edge treatment |
//! |-------|----------------|
//! | Perforated | alternating half-circle arcs in the background paint |
//! | Scalloped | outward bumps; outlined in color, punched dots on plates |
//! | Zigzag | filled outward teeth |
//! | Ticket | one large background notch centered on each edge |
//!
//! The style is chosen from the stamp's random stream, so the color preview
//! and the plates pick the same border for the same seed.

use std::f32::consts::{FRAC_PI_2, PI};

use super::seed::StampRng;
use super::target::{ScallopStyle, StampPalette};
use crate::canvas::{ArcMode, Canvas};
use crate::layout::Rect;

/// Gap between the stamp edge and the outer frame.
pub const FRAME_PADDING: f32 = 8.0;
/// Gap between the outer and inner frame.
pub const INNER_PADDING: f32 = 5.0;

const OUTER_STROKE: f32 = 3.0;
const INNER_STROKE: f32 = 1.5;
const TICK_LENGTH: f32 = 6.0;
const TICK_GAP: f32 = 2.0;

/// How far border marks may reach past the stamp rectangle. Registration
/// ticks end outside it.
pub const MARK_BLEED: f32 = 4.0;

const PERF_SPACING: f32 = 10.0;
const PERF_DIAMETER: f32 = 6.0;
const SCALLOP_PITCH: f32 = 14.0;
const SCALLOP_DIAMETER: f32 = 10.0;
const SCALLOP_DOT: f32 = 7.0;
const ZIGZAG_PITCH: f32 = 12.0;
const ZIGZAG_DEPTH: f32 = 5.0;
const TICKET_NOTCH: f32 = 20.0;

/// Edge decoration algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    Perforated,
    Scalloped,
    Zigzag,
    Ticket,
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 4] = [
        BorderStyle::Perforated,
        BorderStyle::Scalloped,
        BorderStyle::Zigzag,
        BorderStyle::Ticket,
    ];

    /// Uniform choice from the stamp's stream.
    pub fn pick(rng: &mut StampRng) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            BorderStyle::Perforated => "perforated",
            BorderStyle::Scalloped => "scalloped",
            BorderStyle::Zigzag => "zigzag",
            BorderStyle::Ticket => "ticket",
        }
    }
}

/// The outer frame and inner frame of a stamp rectangle.
pub fn frames(stamp: Rect) -> (Rect, Rect) {
    let frame = stamp.inset(FRAME_PADDING);
    (frame, frame.inset(INNER_PADDING))
}

/// Side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Unit vector pointing out of the rectangle.
    fn outward(self) -> (f32, f32) {
        match self {
            Edge::Top => (0.0, -1.0),
            Edge::Right => (1.0, 0.0),
            Edge::Bottom => (0.0, 1.0),
            Edge::Left => (-1.0, 0.0),
        }
    }

    /// Start angle of the outward-facing half circle (y grows downward).
    fn outward_arc_start(self) -> f32 {
        match self {
            Edge::Top => PI,
            Edge::Right => -FRAC_PI_2,
            Edge::Bottom => 0.0,
            Edge::Left => FRAC_PI_2,
        }
    }
}

/// Points along one edge spaced `pitch` apart, centered on the edge.
fn edge_points(r: Rect, edge: Edge, pitch: f32) -> Vec<(f32, f32)> {
    let length = match edge {
        Edge::Top | Edge::Bottom => r.width,
        Edge::Left | Edge::Right => r.height,
    };
    if pitch <= 0.0 || length < pitch {
        return Vec::new();
    }
    let count = (length / pitch).floor() as usize;
    let lead = (length - (count - 1) as f32 * pitch) / 2.0;
    (0..count)
        .map(|i| {
            let t = lead + i as f32 * pitch;
            match edge {
                Edge::Top => (r.x + t, r.y),
                Edge::Bottom => (r.x + t, r.bottom()),
                Edge::Left => (r.x, r.y + t),
                Edge::Right => (r.right(), r.y + t),
            }
        })
        .collect()
}

/// The 8 registration ticks: a horizontal and a vertical stroke leaving
/// each corner of the outer frame.
pub fn registration_ticks(frame: Rect) -> [((f32, f32), (f32, f32)); 8] {
    let corners = [
        (frame.x, frame.y, -1.0, -1.0),
        (frame.right(), frame.y, 1.0, -1.0),
        (frame.right(), frame.bottom(), 1.0, 1.0),
        (frame.x, frame.bottom(), -1.0, 1.0),
    ];
    let mut ticks = [((0.0, 0.0), (0.0, 0.0)); 8];
    for (i, &(cx, cy, sx, sy)) in corners.iter().enumerate() {
        let gap = TICK_GAP + OUTER_STROKE / 2.0;
        ticks[i * 2] = ((cx + sx * gap, cy), (cx + sx * (gap + TICK_LENGTH), cy));
        ticks[i * 2 + 1] = ((cx, cy + sy * gap), (cx, cy + sy * (gap + TICK_LENGTH)));
    }
    ticks
}

/// Draw the complete border for a stamp.
pub fn draw_border(
    canvas: &mut Canvas,
    style: BorderStyle,
    stamp: Rect,
    palette: &StampPalette,
    scallops: ScallopStyle,
) {
    let (frame, inner) = frames(stamp);

    canvas.push();
    canvas.no_fill();
    canvas.stroke(palette.ink);

    // Style-specific marks that sit under the frame lines.
    if style == BorderStyle::Zigzag {
        draw_zigzag(canvas, frame, palette);
    }

    canvas.stroke_weight(OUTER_STROKE);
    canvas.rect(frame.x, frame.y, frame.width, frame.height);
    canvas.stroke_weight(INNER_STROKE);
    canvas.rect(inner.x, inner.y, inner.width, inner.height);

    canvas.stroke_weight(1.0);
    for ((x1, y1), (x2, y2)) in registration_ticks(frame) {
        canvas.line(x1, y1, x2, y2);
    }

    match style {
        BorderStyle::Perforated => draw_perforated(canvas, frame, palette),
        BorderStyle::Scalloped => draw_scalloped(canvas, frame, palette, scallops),
        BorderStyle::Zigzag => {}
        BorderStyle::Ticket => draw_ticket(canvas, frame, palette),
    }

    canvas.pop();
}

fn draw_perforated(canvas: &mut Canvas, frame: Rect, palette: &StampPalette) {
    canvas.no_fill();
    canvas.stroke(palette.background);
    canvas.stroke_weight(2.0);
    for edge in Edge::ALL {
        for (i, (x, y)) in edge_points(frame, edge, PERF_SPACING).into_iter().enumerate() {
            let start = if i % 2 == 0 {
                edge.outward_arc_start()
            } else {
                edge.outward_arc_start() + PI
            };
            canvas.arc(x, y, PERF_DIAMETER, start, start + PI, ArcMode::Open);
        }
    }
}

fn draw_scalloped(
    canvas: &mut Canvas,
    frame: Rect,
    palette: &StampPalette,
    scallops: ScallopStyle,
) {
    for edge in Edge::ALL {
        for (x, y) in edge_points(frame, edge, SCALLOP_PITCH) {
            match scallops {
                ScallopStyle::Stroked => {
                    canvas.no_fill();
                    canvas.stroke(palette.ink);
                    canvas.stroke_weight(1.5);
                    let start = edge.outward_arc_start();
                    canvas.arc(x, y, SCALLOP_DIAMETER, start, start + PI, ArcMode::Open);
                }
                ScallopStyle::FilledDots => {
                    canvas.no_stroke();
                    canvas.fill(palette.background);
                    canvas.circle(x, y, SCALLOP_DOT);
                }
            }
        }
    }
}

fn draw_zigzag(canvas: &mut Canvas, frame: Rect, palette: &StampPalette) {
    canvas.push();
    canvas.no_stroke();
    canvas.fill(palette.ink);
    for edge in Edge::ALL {
        let (nx, ny) = edge.outward();
        // Tangent along the edge.
        let (tx, ty) = (ny.abs(), nx.abs());
        let half = ZIGZAG_PITCH / 2.0;
        for (x, y) in edge_points(frame, edge, ZIGZAG_PITCH) {
            canvas.triangle(
                x - tx * half,
                y - ty * half,
                x + tx * half,
                y + ty * half,
                x + nx * ZIGZAG_DEPTH,
                y + ny * ZIGZAG_DEPTH,
            );
        }
    }
    canvas.pop();
}

fn draw_ticket(canvas: &mut Canvas, frame: Rect, palette: &StampPalette) {
    canvas.no_fill();
    canvas.stroke(palette.background);
    canvas.stroke_weight(3.0);
    let notches = [
        (Edge::Top, frame.center_x(), frame.y),
        (Edge::Right, frame.right(), frame.center_y()),
        (Edge::Bottom, frame.center_x(), frame.bottom()),
        (Edge::Left, frame.x, frame.center_y()),
    ];
    for (edge, x, y) in notches {
        // Inward-facing half circle.
        let start = edge.outward_arc_start() + PI;
        canvas.arc(x, y, TICKET_NOTCH, start, start + PI, ArcMode::Open);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Paint;
    use std::collections::HashSet;

    fn plate_palette() -> StampPalette {
        let ink = Paint::rgb(0, 0, 0);
        StampPalette {
            panel: Paint::rgb(255, 255, 255),
            ink,
            accent: ink,
            trace: ink,
            background: Paint::Erase,
        }
    }

    fn render(style: BorderStyle, scallops: ScallopStyle) -> Canvas {
        let mut c = Canvas::ink_plate(200, 260);
        draw_border(
            &mut c,
            style,
            Rect::new(10.0, 10.0, 180.0, 240.0),
            &plate_palette(),
            scallops,
        );
        c
    }

    #[test]
    fn test_pick_is_seeded() {
        let a: Vec<BorderStyle> = (0..16)
            .map(|i| BorderStyle::pick(&mut StampRng::from_seed(i)))
            .collect();
        let b: Vec<BorderStyle> = (0..16)
            .map(|i| BorderStyle::pick(&mut StampRng::from_seed(i)))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_reaches_every_style() {
        let seen: HashSet<BorderStyle> = (0..200)
            .map(|i| BorderStyle::pick(&mut StampRng::from_seed(i)))
            .collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_frames_are_nested() {
        let (frame, inner) = frames(Rect::new(0.0, 0.0, 100.0, 120.0));
        assert_eq!(frame, Rect::new(8.0, 8.0, 84.0, 104.0));
        assert_eq!(inner, Rect::new(13.0, 13.0, 74.0, 94.0));
    }

    #[test]
    fn test_eight_ticks_outside_frame() {
        let frame = Rect::new(10.0, 10.0, 50.0, 50.0);
        let ticks = registration_ticks(frame);
        assert_eq!(ticks.len(), 8);
        for ((x1, y1), (x2, y2)) in ticks {
            // Each tick is axis aligned and starts outside the frame line.
            assert!(x1 == x2 || y1 == y2);
            let outside = |x: f32, y: f32| x < 10.0 || x > 60.0 || y < 10.0 || y > 60.0;
            assert!(outside(x1, y1) && outside(x2, y2));
        }
    }

    #[test]
    fn test_ticks_stay_within_bleed() {
        let stamp = Rect::new(20.0, 20.0, 100.0, 140.0);
        let (frame, _) = frames(stamp);
        let reach = 0.5;
        for ((x1, y1), (x2, y2)) in registration_ticks(frame) {
            for (x, y) in [(x1, y1), (x2, y2)] {
                assert!(x - reach >= stamp.x - MARK_BLEED);
                assert!(x + reach <= stamp.right() + MARK_BLEED);
                assert!(y - reach >= stamp.y - MARK_BLEED);
                assert!(y + reach <= stamp.bottom() + MARK_BLEED);
            }
        }
    }

    #[test]
    fn test_edge_points_are_centered() {
        let pts = edge_points(Rect::new(0.0, 0.0, 100.0, 10.0), Edge::Top, 10.0);
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], (5.0, 0.0));
        assert_eq!(pts[9], (95.0, 0.0));
        assert!(edge_points(Rect::new(0.0, 0.0, 5.0, 5.0), Edge::Left, 10.0).is_empty());
    }

    #[test]
    fn test_every_style_draws_frame() {
        for style in BorderStyle::ALL {
            let c = render(style, ScallopStyle::FilledDots);
            // Inner frame line, away from any edge decoration.
            let (_, inner) = frames(Rect::new(10.0, 10.0, 180.0, 240.0));
            let y = inner.y as u32;
            let inked = (inner.x as u32 + 20..inner.right() as u32 - 20)
                .filter(|&x| c.image().get_pixel(x, y)[3] == 255)
                .count();
            assert!(inked > 50, "{} frame missing", style.name());
        }
    }

    #[test]
    fn test_perforations_punch_holes() {
        let plain = render(BorderStyle::Zigzag, ScallopStyle::FilledDots);
        let perf = render(BorderStyle::Perforated, ScallopStyle::FilledDots);
        let ink = |c: &Canvas| c.image().pixels().filter(|p| p[3] == 255).count();
        // Zigzag adds teeth; perforation only removes ink from the frame.
        assert!(ink(&perf) < ink(&plain));
    }

    #[test]
    fn test_scallop_divergence() {
        let stroked = render(BorderStyle::Scalloped, ScallopStyle::Stroked);
        let dotted = render(BorderStyle::Scalloped, ScallopStyle::FilledDots);
        assert_ne!(stroked.image().as_raw(), dotted.image().as_raw());
        // Bumps extend beyond the outer frame stroke only when stroked.
        let (frame, _) = frames(Rect::new(10.0, 10.0, 180.0, 240.0));
        let above = (frame.y - 4.0) as u32;
        let row_ink = |c: &Canvas| {
            (frame.x as u32 + 10..frame.right() as u32 - 10)
                .filter(|&x| c.image().get_pixel(x, above)[3] == 255)
                .count()
        };
        assert!(row_ink(&stroked) > 0);
        assert_eq!(row_ink(&dotted), 0);
    }

    #[test]
    fn test_ticket_notches_cut_frame() {
        let ticket = render(BorderStyle::Ticket, ScallopStyle::FilledDots);
        let (frame, _) = frames(Rect::new(10.0, 10.0, 180.0, 240.0));
        // The outer frame at the top center sits inside the notch ring
        // radius minus the frame, so it is erased near x = center +- 10.
        let y = frame.y as u32;
        let x = (frame.center_x() + 10.0) as u32;
        assert_eq!(ticket.image().get_pixel(x, y)[3], 0);
    }
}

//! Circuit-trace background decoration.
//!
//! Older devices get denser circuitry:
//!
//! ```text
//! t     = (clamp(year, 1960, 2020) - 1960) / 60
//! count = round(MAX_TRACES + (MIN_TRACES - MAX_TRACES) * t)
//! ```
//!
//! Each trace is an orthogonal random walk of `TRACE_STEPS` moves starting
//! above the footer strip, every point clamped into the area, with a pad dot
//! at both ends.

use super::seed::StampRng;
use super::target::StampPalette;
use crate::canvas::Canvas;
use crate::layout::Rect;

pub const MAX_TRACES: usize = 26;
pub const MIN_TRACES: usize = 6;
pub const TRACE_STEPS: usize = 7;
pub const TRACE_STEP_MIN: f32 = 6.0;
pub const TRACE_STEP_MAX: f32 = 24.0;

const EARLIEST_YEAR: i32 = 1960;
const LATEST_YEAR: i32 = 2020;
const PAD_DIAMETER: f32 = 4.0;

/// Number of traces for a release year; `None` when the year is unknown.
pub fn trace_count(release_year: Option<i32>) -> usize {
    let Some(year) = release_year else {
        return 0;
    };
    let t = (year.clamp(EARLIEST_YEAR, LATEST_YEAR) - EARLIEST_YEAR) as f32
        / (LATEST_YEAR - EARLIEST_YEAR) as f32;
    let count = MAX_TRACES as f32 + (MIN_TRACES as f32 - MAX_TRACES as f32) * t;
    count.round() as usize
}

/// Generate the trace polylines inside `area`.
///
/// Always consumes the stream for every trace, whether or not the caller
/// ends up drawing them.
pub fn generate(rng: &mut StampRng, area: Rect, count: usize) -> Vec<Vec<(f32, f32)>> {
    let clamp = |x: f32, y: f32| (x.clamp(area.x, area.right()), y.clamp(area.y, area.bottom()));

    (0..count)
        .map(|_| {
            let mut x = rng.range_f32(area.x, area.right());
            let mut y = rng.range_f32(area.y, area.bottom());
            let mut points = Vec::with_capacity(TRACE_STEPS + 1);
            points.push((x, y));
            for _ in 0..TRACE_STEPS {
                let length = rng.range_f32(TRACE_STEP_MIN, TRACE_STEP_MAX);
                let (dx, dy) = match rng.index(4) {
                    0 => (length, 0.0),
                    1 => (-length, 0.0),
                    2 => (0.0, length),
                    _ => (0.0, -length),
                };
                (x, y) = clamp(x + dx, y + dy);
                points.push((x, y));
            }
            points
        })
        .collect()
}

pub fn draw_traces(canvas: &mut Canvas, traces: &[Vec<(f32, f32)>], palette: &StampPalette) {
    canvas.push();
    canvas.no_fill();
    canvas.stroke(palette.trace);
    canvas.stroke_weight(1.0);
    for trace in traces {
        canvas.polygon(trace, false);
    }
    canvas.no_stroke();
    canvas.fill(palette.trace);
    for trace in traces {
        if let (Some(&(x0, y0)), Some(&(x1, y1))) = (trace.first(), trace.last()) {
            canvas.circle(x0, y0, PAD_DIAMETER);
            canvas.circle(x1, y1, PAD_DIAMETER);
        }
    }
    canvas.pop();
}

//! # Drawing Surface
//!
//! An immediate-mode RGBA raster surface. Stamps are composed by issuing
//! primitive calls (rect, circle, arc, line, triangle, polyline, text)
//! against a [`Canvas`], with a push/pop style stack for stroke, fill,
//! stroke weight, text size/style and translation.
//!
//! Shapes are rasterized from signed distance functions sampled at pixel
//! centers.
//! A canvas built with [`Canvas::ink_plate`] disables anti-aliasing so every
//! mark is either fully inked or absent.
//!
//! ## Paint
//!
//! A [`Paint`] is either a color (source-over blended) or [`Paint::Erase`],
//! which removes coverage and leaves transparency behind. Erase is how ink
//! plates punch "background colored" holes: the paper shows through.

pub mod font;
pub mod raster;

use image::{Rgba, RgbaImage};

pub use font::{TextSize, TextStyle};

/// How a shape is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Straight-alpha RGBA color, blended source-over.
    Color(Rgba<u8>),
    /// Clear to transparent.
    Erase,
}

impl Paint {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Paint::Color(Rgba([r, g, b, 255]))
    }
}

/// Horizontal anchor for [`Canvas::text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// How [`Canvas::arc`] closes its shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArcMode {
    /// Stroke the curve only; never filled.
    #[default]
    Open,
    /// Filled wedge from the center, stroke on the curve.
    Pie,
}

/// Drawing state saved and restored by [`Canvas::push`] / [`Canvas::pop`].
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_weight: f32,
    pub text_size: TextSize,
    pub text_style: TextStyle,
    pub text_align: TextAlign,
    pub translate: (f32, f32),
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Paint::rgb(255, 255, 255)),
            stroke: Some(Paint::rgb(0, 0, 0)),
            stroke_weight: 1.0,
            text_size: TextSize::Medium,
            text_style: TextStyle::Regular,
            text_align: TextAlign::Left,
            translate: (0.0, 0.0),
        }
    }
}

/// RGBA raster surface with a style stack.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    style: Style,
    stack: Vec<Style>,
    antialias: bool,
}

impl Canvas {
    /// An anti-aliased surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            style: Style::default(),
            stack: Vec::new(),
            antialias: true,
        }
    }

    /// A transparent, aliased surface for monochrome ink.
    pub fn ink_plate(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            style: Style::default(),
            stack: Vec::new(),
            antialias: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn is_antialiased(&self) -> bool {
        self.antialias
    }

    /// Reset every pixel to `color` and drop all saved styles.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for p in self.image.pixels_mut() {
            *p = color;
        }
        self.style = Style::default();
        self.stack.clear();
    }

    // ------------------------------------------------------------------
    // Style stack
    // ------------------------------------------------------------------

    pub fn push(&mut self) {
        self.stack.push(self.style);
    }

    pub fn pop(&mut self) {
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn fill(&mut self, paint: Paint) {
        self.style.fill = Some(paint);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, paint: Paint) {
        self.style.stroke = Some(paint);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight.max(0.0);
    }

    pub fn text_size(&mut self, size: TextSize) {
        self.style.text_size = size;
    }

    pub fn text_style(&mut self, style: TextStyle) {
        self.style.text_style = style;
    }

    pub fn text_align(&mut self, align: TextAlign) {
        self.style.text_align = align;
    }

    /// Shift the origin for subsequent calls (cumulative).
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.style.translate.0 += dx;
        self.style.translate.1 += dy;
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x, y) = self.to_device(x, y);
        let cx = x + w / 2.0;
        let cy = y + h / 2.0;
        let (hw, hh) = (w / 2.0, h / 2.0);
        let sdf = move |px: f32, py: f32| ((px - cx).abs() - hw).max((py - cy).abs() - hh);

        if let Some(paint) = self.style.fill {
            self.paint_sdf((x, y, x + w, y + h), paint, sdf);
        }
        if let Some(paint) = self.style.stroke {
            let half = self.style.stroke_weight / 2.0;
            if half > 0.0 {
                let bounds = (x - half, y - half, x + w + half, y + h + half);
                self.paint_sdf(bounds, paint, move |px, py| sdf(px, py).abs() - half);
            }
        }
    }

    /// Circle centered at `(cx, cy)` with the given diameter.
    pub fn circle(&mut self, cx: f32, cy: f32, diameter: f32) {
        let (cx, cy) = self.to_device(cx, cy);
        let r = diameter / 2.0;
        let dist = move |px: f32, py: f32| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

        if let Some(paint) = self.style.fill {
            self.paint_sdf((cx - r, cy - r, cx + r, cy + r), paint, move |px, py| {
                dist(px, py) - r
            });
        }
        if let Some(paint) = self.style.stroke {
            let half = self.style.stroke_weight / 2.0;
            if half > 0.0 {
                let e = r + half;
                self.paint_sdf((cx - e, cy - e, cx + e, cy + e), paint, move |px, py| {
                    (dist(px, py) - r).abs() - half
                });
            }
        }
    }

    /// Circular arc of the given diameter between two angles (radians,
    /// clockwise from +x since y grows downward).
    pub fn arc(&mut self, cx: f32, cy: f32, diameter: f32, start: f32, stop: f32, mode: ArcMode) {
        let (cx, cy) = self.to_device(cx, cy);
        let r = diameter / 2.0;
        let sweep = stop - start;
        let in_sweep = move |px: f32, py: f32| {
            if sweep >= std::f32::consts::TAU {
                return true;
            }
            let a = (py - cy).atan2(px - cx);
            (a - start).rem_euclid(std::f32::consts::TAU) <= sweep
        };
        let dist = move |px: f32, py: f32| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

        if mode == ArcMode::Pie
            && let Some(paint) = self.style.fill
        {
            self.paint_sdf((cx - r, cy - r, cx + r, cy + r), paint, move |px, py| {
                if in_sweep(px, py) {
                    dist(px, py) - r
                } else {
                    f32::INFINITY
                }
            });
        }
        if let Some(paint) = self.style.stroke {
            let half = self.style.stroke_weight / 2.0;
            if half > 0.0 {
                let e = r + half;
                self.paint_sdf((cx - e, cy - e, cx + e, cy + e), paint, move |px, py| {
                    if in_sweep(px, py) {
                        (dist(px, py) - r).abs() - half
                    } else {
                        f32::INFINITY
                    }
                });
            }
        }
    }

    /// Straight segment in the stroke paint.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let Some(paint) = self.style.stroke else {
            return;
        };
        let half = self.style.stroke_weight / 2.0;
        if half <= 0.0 {
            return;
        }
        let (x1, y1) = self.to_device(x1, y1);
        let (x2, y2) = self.to_device(x2, y2);
        let bounds = (
            x1.min(x2) - half,
            y1.min(y2) - half,
            x1.max(x2) + half,
            y1.max(y2) + half,
        );
        self.paint_sdf(bounds, paint, move |px, py| {
            raster::segment_distance(px, py, x1, y1, x2, y2) - half
        });
    }

    pub fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.polygon(&[(x1, y1), (x2, y2), (x3, y3)], true);
    }

    /// Open polyline or closed polygon. Closed shapes are filled even-odd.
    pub fn polygon(&mut self, points: &[(f32, f32)], closed: bool) {
        if points.len() < 2 {
            return;
        }
        let pts: Vec<(f32, f32)> = points.iter().map(|&(x, y)| self.to_device(x, y)).collect();

        if closed
            && points.len() >= 3
            && let Some(paint) = self.style.fill
        {
            let bounds = raster::points_bounds(&pts, 0.0);
            let poly = pts.clone();
            self.paint_sdf(bounds, paint, move |px, py| raster::polygon_sdf(px, py, &poly));
        }

        if let Some(paint) = self.style.stroke {
            let half = self.style.stroke_weight / 2.0;
            if half <= 0.0 {
                return;
            }
            let mut segments: Vec<((f32, f32), (f32, f32))> =
                pts.windows(2).map(|w| (w[0], w[1])).collect();
            if closed && let (Some(&first), Some(&last)) = (pts.first(), pts.last()) {
                segments.push((last, first));
            }
            let bounds = raster::points_bounds(&pts, half);
            self.paint_sdf(bounds, paint, move |px, py| {
                segments
                    .iter()
                    .map(|&((ax, ay), (bx, by))| raster::segment_distance(px, py, ax, ay, bx, by))
                    .fold(f32::INFINITY, f32::min)
                    - half
            });
        }
    }

    /// Draw text in the fill paint. `y` is the top of the line box.
    pub fn text(&mut self, text: &str, x: f32, y: f32) {
        let Some(paint) = self.style.fill else {
            return;
        };
        let width = self.text_width(text);
        let x = match self.style.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
        };
        let (x, y) = self.to_device(x, y);
        let size = self.style.text_size;
        let style = self.style.text_style;

        let mut marks = Vec::new();
        font::rasterize(text, size, style, |gx, gy| marks.push((gx, gy)));
        let ox = x.round() as i32;
        let oy = y.round() as i32;
        for (gx, gy) in marks {
            self.plot(ox + gx, oy + gy, paint, 1.0);
        }
    }

    /// Advance width of `text` at the current text size and style.
    pub fn text_width(&self, text: &str) -> f32 {
        font::advance_width(text, self.style.text_size, self.style.text_style) as f32
    }

    /// Line height at the current text size.
    pub fn line_height(&self) -> f32 {
        self.style.text_size.line_height() as f32
    }

    /// Blit an image with its top-left at `(x, y)`, alpha blended.
    pub fn image_at(&mut self, img: &RgbaImage, x: f32, y: f32) {
        let (x, y) = self.to_device(x, y);
        let ox = x.round() as i32;
        let oy = y.round() as i32;
        for (ix, iy, p) in img.enumerate_pixels() {
            if p[3] > 0 {
                self.plot(ox + ix as i32, oy + iy as i32, Paint::Color(*p), 1.0);
            }
        }
    }

    /// Composite another canvas of any size onto this one at `(x, y)`
    /// in device space, ignoring the current translation.
    pub fn composite(&mut self, src: &Canvas, x: i32, y: i32) {
        for (ix, iy, p) in src.image.enumerate_pixels() {
            if p[3] > 0 {
                self.plot(x + ix as i32, y + iy as i32, Paint::Color(*p), 1.0);
            }
        }
    }

    // ------------------------------------------------------------------
    // Rasterization
    // ------------------------------------------------------------------

    fn to_device(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.style.translate.0, y + self.style.translate.1)
    }

    /// Paint every pixel in `bounds` according to a signed distance
    /// (negative inside, positive outside).
    fn paint_sdf<F>(&mut self, bounds: (f32, f32, f32, f32), paint: Paint, sdf: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let (min_x, min_y, max_x, max_y) = bounds;
        let x0 = ((min_x - 1.0).floor() as i64).max(0);
        let y0 = ((min_y - 1.0).floor() as i64).max(0);
        let x1 = ((max_x + 1.0).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((max_y + 1.0).ceil() as i64).min(self.height() as i64 - 1);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let d = sdf(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = if self.antialias {
                    raster::coverage_aa(d)
                } else {
                    raster::coverage_hard(d)
                };
                if coverage > 0.0 {
                    self.plot(px as i32, py as i32, paint, coverage);
                }
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32, paint: Paint, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = raster::blend(*dst, paint, coverage);
    }
}

// ============================================================================
// TESTS
// ============================================================================

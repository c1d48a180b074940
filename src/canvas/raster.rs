//! Geometry and pixel helpers shared by the canvas primitives.

use image::Rgba;

use super::Paint;

/// Anti-aliased coverage for a signed distance (negative inside).
#[inline]
pub fn coverage_aa(d: f32) -> f32 {
    if d <= 0.0 {
        1.0
    } else if d < 1.0 {
        1.0 - d
    } else {
        0.0
    }
}

/// Hard-edged coverage: a pixel center is either inside or not.
#[inline]
pub fn coverage_hard(d: f32) -> f32 {
    if d <= 0.0 { 1.0 } else { 0.0 }
}

/// Distance from a point to the segment `a`–`b`.
pub fn segment_distance(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-6 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Bounding box of a point list, grown by `pad`.
pub fn points_bounds(points: &[(f32, f32)], pad: f32) -> (f32, f32, f32, f32) {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for &(x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x - pad, min_y - pad, max_x + pad, max_y + pad)
}

/// Signed distance to a closed polygon, even-odd inside test.
pub fn polygon_sdf(px: f32, py: f32, poly: &[(f32, f32)]) -> f32 {
    let n = poly.len();
    let mut inside = false;
    let mut nearest = f32::INFINITY;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        nearest = nearest.min(segment_distance(px, py, xi, yi, xj, yj));
        j = i;
    }
    if inside { -nearest } else { nearest }
}

/// Blend `paint` at `coverage` over a straight-alpha destination pixel.
pub fn blend(dst: Rgba<u8>, paint: Paint, coverage: f32) -> Rgba<u8> {
    let da = dst[3] as f32 / 255.0;
    match paint {
        Paint::Erase => {
            let a = da * (1.0 - coverage.clamp(0.0, 1.0));
            Rgba([dst[0], dst[1], dst[2], (a * 255.0).round() as u8])
        }
        Paint::Color(src) => {
            let sa = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
            if sa <= 0.0 {
                return dst;
            }
            let oa = sa + da * (1.0 - sa);
            let mix = |s: u8, d: u8| {
                let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa;
                v.round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                mix(src[0], dst[0]),
                mix(src[1], dst[1]),
                mix(src[2], dst[2]),
                (oa * 255.0).round().clamp(0.0, 255.0) as u8,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance() {
        assert!((segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0) - 3.0).abs() < 1e-6);
        // Beyond the end clamps to the endpoint.
        assert!((segment_distance(13.0, 4.0, 0.0, 0.0, 10.0, 0.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_sdf_sign() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!(polygon_sdf(5.0, 5.0, &square) < 0.0);
        assert!(polygon_sdf(15.0, 5.0, &square) > 0.0);
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let out = blend(Rgba([9, 9, 9, 255]), Paint::rgb(200, 10, 10), 1.0);
        assert_eq!(out, Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_blend_onto_transparent() {
        let out = blend(Rgba([0, 0, 0, 0]), Paint::rgb(40, 50, 60), 1.0);
        assert_eq!(out, Rgba([40, 50, 60, 255]));
    }

    #[test]
    fn test_erase_partial() {
        let out = blend(Rgba([1, 2, 3, 255]), Paint::Erase, 0.5);
        assert_eq!(out[3], 128);
    }
}

//! Aspect-preserving fit of an image into a box.
//!
//! The direct-color draw and the halftone path share [`fit_box`], so the
//! photo lands on exactly the same pixels in both renders.

use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::{DitherSettings, LevelsSettings, halftone};
use crate::layout::Rect;

/// Integer placement of a fitted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Largest box with the source aspect ratio that fits `target`, centered,
/// snapped to whole pixels. `None` when either side would be empty.
pub fn fit_box(src_width: u32, src_height: u32, target: Rect) -> Option<FitBox> {
    if src_width == 0 || src_height == 0 || target.width < 1.0 || target.height < 1.0 {
        return None;
    }
    let scale = (target.width / src_width as f32).min(target.height / src_height as f32);
    let width = (src_width as f32 * scale).round() as u32;
    let height = (src_height as f32 * scale).round() as u32;
    if width == 0 || height == 0 {
        return None;
    }
    let x = (target.x + (target.width - width as f32) / 2.0).round() as i32;
    let y = (target.y + (target.height - height as f32) / 2.0).round() as i32;
    Some(FitBox {
        x,
        y,
        width,
        height,
    })
}

/// Resize `img` into its letterboxed placement inside `target`.
pub fn letterbox(img: &RgbaImage, target: Rect) -> Option<(RgbaImage, FitBox)> {
    let placement = fit_box(img.width(), img.height(), target)?;
    let resized = if placement.width == img.width() && placement.height == img.height() {
        img.clone()
    } else {
        imageops::resize(img, placement.width, placement.height, FilterType::Triangle)
    };
    Some((resized, placement))
}

/// Letterbox, then level and dither, ready to stamp onto a plate at the
/// returned placement.
pub fn fit_and_place(
    img: &RgbaImage,
    target: Rect,
    levels: &LevelsSettings,
    dither: &DitherSettings,
) -> Option<(RgbaImage, FitBox)> {
    let (fitted, placement) = letterbox(img, target)?;
    Some((halftone(&fitted, levels, dither), placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_wide_image_letterboxes_vertically() {
        let b = fit_box(200, 100, Rect::new(10.0, 20.0, 100.0, 100.0)).unwrap();
        assert_eq!(
            b,
            FitBox {
                x: 10,
                y: 45,
                width: 100,
                height: 50,
            }
        );
    }

    #[test]
    fn test_tall_image_pillarboxes() {
        let b = fit_box(50, 100, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(
            b,
            FitBox {
                x: 25,
                y: 0,
                width: 50,
                height: 100,
            }
        );
    }

    #[test]
    fn test_upscales_small_images() {
        let b = fit_box(10, 10, Rect::new(0.0, 0.0, 40.0, 80.0)).unwrap();
        assert_eq!((b.width, b.height), (40, 40));
        assert_eq!(b.y, 20);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_box(0, 10, Rect::new(0.0, 0.0, 10.0, 10.0)).is_none());
        assert!(fit_box(10, 10, Rect::new(0.0, 0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_fit_and_place_output_matches_box() {
        let img = RgbaImage::from_fn(30, 20, |x, _| Rgba([(x * 8) as u8, 0, 0, 255]));
        let (out, b) = fit_and_place(
            &img,
            Rect::new(0.0, 0.0, 60.0, 60.0),
            &LevelsSettings::default(),
            &DitherSettings::default(),
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (b.width, b.height));
        assert_eq!((b.width, b.height), (60, 40));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}

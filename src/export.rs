//! PNG export and file naming.
//!
//! ```text
//! stamps-s42-sheet01-20260127-093000.png
//! stamps-s42-sheet01-20260127-093000-plate-primary.png
//! stamps-s42-sheet01-20260127-093000-plate-secondary.png
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use image::RgbaImage;

use crate::error::{Result, StampError};
use crate::sheet::PlateImages;

fn stem<Tz: TimeZone>(run_seed: u32, sheet_index: usize, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "stamps-s{}-sheet{:02}-{}",
        run_seed,
        sheet_index + 1,
        at.format("%Y%m%d-%H%M%S")
    )
}

/// File name for a color sheet export. `sheet_index` is zero-based.
pub fn sheet_file_name<Tz: TimeZone>(run_seed: u32, sheet_index: usize, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.png", stem(run_seed, sheet_index, at))
}

/// File names for the primary and secondary plate masters.
pub fn plate_file_names<Tz: TimeZone>(
    run_seed: u32,
    sheet_index: usize,
    at: &DateTime<Tz>,
) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    let stem = stem(run_seed, sheet_index, at);
    (
        format!("{}-plate-primary.png", stem),
        format!("{}-plate-secondary.png", stem),
    )
}

/// Encode `image` as PNG at `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| StampError::Image(format!("Failed to save PNG {}: {}", path.display(), e)))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Write both plate masters into `dir`; returns the written paths.
pub fn save_plates<Tz: TimeZone>(
    plates: &PlateImages,
    dir: &Path,
    run_seed: u32,
    sheet_index: usize,
    at: &DateTime<Tz>,
) -> Result<(PathBuf, PathBuf)>
where
    Tz::Offset: std::fmt::Display,
{
    let (primary, secondary) = plate_file_names(run_seed, sheet_index, at);
    let primary = dir.join(primary);
    let secondary = dir.join(secondary);
    save_png(&plates.primary, &primary)?;
    save_png(&plates.secondary, &secondary)?;
    Ok((primary, secondary))
}

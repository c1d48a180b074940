//! # Sheet Configuration
//!
//! Physical layout, palette and separation settings for a sheet.
//!
//! ## Defaults
//!
//! | Property | Value |
//! |----------|-------|
//! | Sheet | 1600 x 2000 px |
//! | Grid | 5 columns x 4 rows |
//! | Margin | 40 px |
//! | Gutters | 16 px |
//! | Levels | clip 1% / 99%, gamma 0.9 |
//! | Dither | Bayer 8x8, gain 1, bias 0 |
//!
//! Every field can be overridden from a JSON file; missing fields keep their
//! defaults.
//!
//! ```
//! use stampsheet::config::SheetConfig;
//!
//! let config = SheetConfig::from_json_str(r#"{"columns": 3, "rows": 2}"#).unwrap();
//! assert_eq!(config.page_size(), 6);
//! assert_eq!(config.width, 1600);
//! ```

use std::path::Path;

use image::Rgba;
use serde::Deserialize;

use crate::error::{Result, StampError};
use crate::layout::Grid;
use crate::separation::{DitherSettings, LevelsSettings};

/// Sheet geometry, palette and separation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Sheet width in pixels.
    pub width: u32,
    /// Sheet height in pixels.
    pub height: u32,
    /// Blank border around the grid.
    pub margin: f32,
    pub columns: usize,
    pub rows: usize,
    pub gutter_x: f32,
    pub gutter_y: f32,
    pub palette: Palette,
    pub levels: LevelsSettings,
    pub dither: DitherSettings,
    /// Whether the two-plate print subsystem is available at all.
    pub plates_enabled: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 2000,
            margin: 40.0,
            columns: 5,
            rows: 4,
            gutter_x: 16.0,
            gutter_y: 16.0,
            palette: Palette::default(),
            levels: LevelsSettings::default(),
            dither: DitherSettings::default(),
            plates_enabled: true,
        }
    }
}

impl SheetConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StampError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Reject settings the renderer cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StampError::Config("sheet size must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.levels.clip_low)
            || !(0.0..=1.0).contains(&self.levels.clip_high)
        {
            return Err(StampError::Config("level clip fractions must be in [0, 1]".into()));
        }
        if self.levels.gamma <= 0.0 {
            return Err(StampError::Config("gamma must be positive".into()));
        }
        self.grid()?;
        Ok(())
    }

    /// Stamps per sheet.
    pub fn page_size(&self) -> usize {
        self.columns * self.rows
    }

    /// The stamp grid inside the sheet margin.
    pub fn grid(&self) -> Result<Grid> {
        let grid = Grid::new(
            self.margin,
            self.margin,
            self.width as f32 - 2.0 * self.margin,
            self.height as f32 - 2.0 * self.margin,
            self.columns,
            self.rows,
            self.gutter_x,
            self.gutter_y,
        )?;
        Ok(grid)
    }
}

/// Sheet colors as RGB triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Sheet background behind the stamps.
    pub sheet: [u8; 3],
    /// Stamp panel / paper.
    pub paper: [u8; 3],
    /// Line work and text.
    pub ink: [u8; 3],
    /// Medallion and stars.
    pub accent: [u8; 3],
    /// Circuit traces.
    pub trace: [u8; 3],
    /// Preview tint of the primary plate.
    pub primary_ink: [u8; 3],
    /// Preview tint of the secondary (halftone) plate.
    pub secondary_ink: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sheet: [232, 228, 218],
            paper: [248, 244, 232],
            ink: [34, 38, 52],
            accent: [196, 62, 48],
            trace: [150, 170, 160],
            // Risograph "Blue" and "Fluorescent Pink".
            primary_ink: [0, 120, 191],
            secondary_ink: [255, 72, 176],
        }
    }
}

/// Opaque RGBA from an RGB triple.
pub fn rgba(c: [u8; 3]) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

//! # Sheet Renderer
//!
//! Renders one sheet of stamps for a [`Session`].
//!
//! ```text
//! records ──slice──▶ sheet ──assets settled?──▶ compose each stamp ──▶ output
//!                                   │ no
//!                                   ▼
//!                               Pending
//! ```
//!
//! In color mode the stamps go onto a fresh [`DirectTarget`]. In print mode
//! they go onto a [`PlateTarget`] that is created on first use and cleared
//! at the start of every sheet; the result carries both plate masters and a
//! combined preview with each plate tinted in its ink.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::assets::AssetStore;
use crate::canvas::{Canvas, Paint, TextAlign, TextSize, TextStyle};
use crate::catalog::Catalog;
use crate::config::{SheetConfig, rgba};
use crate::error::Result;
use crate::layout::Grid;
use crate::session::{Session, sheet_count, sheet_range};
use crate::stamp::{
    DirectTarget, PlateTarget, RenderTarget, StampContext, StampSummary, compose_stamp,
};

/// Black-on-white plate masters ready for export.
#[derive(Debug, Clone)]
pub struct PlateImages {
    pub primary: RgbaImage,
    pub secondary: RgbaImage,
}

/// A finished sheet.
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    /// Color preview, or the tinted plate preview in print mode.
    pub preview: RgbaImage,
    /// Present only in print mode.
    pub plates: Option<PlateImages>,
    /// One entry per stamp drawn, in grid order.
    pub stamps: Vec<StampSummary>,
}

/// Outcome of [`SheetRenderer::render`].
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// Images referenced by the sheet are still loading.
    Pending { settled: usize, requested: usize },
    /// No usable catalog; a notice sheet was drawn instead.
    Placeholder(RenderedSheet),
    Rendered(RenderedSheet),
}

/// Owns the grid and the reusable ink plates.
#[derive(Debug)]
pub struct SheetRenderer {
    config: SheetConfig,
    grid: Grid,
    plates: Option<PlateTarget>,
}

impl SheetRenderer {
    pub fn new(config: SheetConfig) -> Result<Self> {
        let grid = config.grid()?;
        Ok(Self {
            config,
            grid,
            plates: None,
        })
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn plates_available(&self) -> bool {
        self.config.plates_enabled
    }

    /// Whether the ink plates have been created yet.
    pub fn has_plates(&self) -> bool {
        self.plates.is_some()
    }

    /// Total sheets for a catalog (1 when absent).
    pub fn sheet_count(&self, catalog: Option<&Catalog>) -> usize {
        sheet_count(catalog.map_or(0, Catalog::len), self.config.page_size())
    }

    /// Image paths referenced by the session's current sheet.
    pub fn sheet_image_paths<'a>(&self, session: &Session, catalog: &'a Catalog) -> Vec<&'a Path> {
        let total = self.sheet_count(Some(catalog));
        let range = sheet_range(
            session.sheet_index % total,
            self.config.page_size(),
            catalog.len(),
        );
        catalog.records()[range]
            .iter()
            .filter_map(|r| r.image_path.as_deref())
            .collect()
    }

    /// Render the session's current sheet.
    ///
    /// Returns [`RenderOutcome::Pending`] while any of the sheet's image
    /// paths that `assets` has requested is unsettled. Paths never requested
    /// draw no photo, so callers wanting photos should
    /// [`AssetStore::load_all`] the [`Self::sheet_image_paths`] first.
    pub fn render(
        &mut self,
        session: &Session,
        catalog: Option<&Catalog>,
        assets: &AssetStore,
    ) -> RenderOutcome {
        let Some(catalog) = catalog.filter(|c| !c.is_empty()) else {
            log::warn!("no records loaded, drawing placeholder sheet");
            return RenderOutcome::Placeholder(self.placeholder());
        };

        let paths = self.sheet_image_paths(session, catalog);
        let (settled, requested) = assets.progress(paths.iter().copied());
        if settled < requested {
            log::debug!("sheet waiting on images: {}/{}", settled, requested);
            return RenderOutcome::Pending { settled, requested };
        }

        let total = self.sheet_count(Some(catalog));
        let sheet = session.sheet_index % total;
        let range = sheet_range(sheet, self.config.page_size(), catalog.len());
        log::debug!(
            "rendering sheet {}/{} (records {}..{}, seed {}, print {})",
            sheet + 1,
            total,
            range.start,
            range.end,
            session.run_seed,
            session.print_mode,
        );

        let print = session.print_mode && self.plates_available();
        if session.print_mode && !print {
            log::warn!("print mode requested but plates are unavailable, rendering color");
        }

        let (width, height) = (self.config.width, self.config.height);
        if print {
            let config = &self.config;
            let plates = self.plates.get_or_insert_with(|| {
                log::debug!("creating ink plates {}x{}", width, height);
                PlateTarget::new(width, height, &config.palette, config.levels, config.dither)
            });
            plates.reset();
            let stamps = compose_all(&mut *plates, &self.grid, catalog, range, session, assets);
            let sheet = RenderedSheet {
                preview: combine_plates(plates, &self.config),
                plates: Some(PlateImages {
                    primary: plate_master(plates.primary()),
                    secondary: plate_master(plates.secondary()),
                }),
                stamps,
            };
            RenderOutcome::Rendered(sheet)
        } else {
            let mut target = DirectTarget::new(width, height, &self.config.palette);
            let stamps = compose_all(&mut target, &self.grid, catalog, range, session, assets);
            RenderOutcome::Rendered(RenderedSheet {
                preview: target.into_image(),
                plates: None,
                stamps,
            })
        }
    }

    /// Notice sheet shown when no records are available.
    fn placeholder(&self) -> RenderedSheet {
        let palette = &self.config.palette;
        let mut canvas = Canvas::new(self.config.width, self.config.height, rgba(palette.sheet));
        let bounds = self.grid.bounds();
        canvas.no_fill();
        canvas.stroke(Paint::Color(rgba(palette.ink)));
        canvas.stroke_weight(2.0);
        canvas.rect(bounds.x, bounds.y, bounds.width, bounds.height);

        canvas.no_stroke();
        canvas.fill(Paint::Color(rgba(palette.ink)));
        canvas.text_align(TextAlign::Center);
        canvas.text_size(TextSize::Large);
        canvas.text_style(TextStyle::Bold);
        let lh = canvas.line_height();
        canvas.text("catalog unavailable", bounds.center_x(), bounds.center_y() - lh);
        canvas.text_size(TextSize::Small);
        canvas.text_style(TextStyle::Regular);
        canvas.text(
            "load a record source to render stamps",
            bounds.center_x(),
            bounds.center_y() + 4.0,
        );

        RenderedSheet {
            preview: canvas.into_image(),
            plates: None,
            stamps: Vec::new(),
        }
    }
}

fn compose_all(
    target: &mut dyn RenderTarget,
    grid: &Grid,
    catalog: &Catalog,
    range: std::ops::Range<usize>,
    session: &Session,
    assets: &AssetStore,
) -> Vec<StampSummary> {
    let mut stamps = Vec::with_capacity(range.len());
    for (slot, record) in catalog.records()[range].iter().enumerate() {
        let Ok(cell) = grid.cell_at(slot) else {
            continue;
        };
        let ctx = StampContext {
            run_seed: session.run_seed,
            show_traces: session.show_traces,
            image: record.image_path.as_deref().and_then(|p| assets.get(p)),
        };
        stamps.push(compose_stamp(target, record, cell, &ctx));
    }
    stamps
}

/// Flatten a plate onto white paper: ink stays black.
fn plate_master(plate: &Canvas) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(plate.width(), plate.height(), Rgba([255, 255, 255, 255]));
    for (src, dst) in plate.image().pixels().zip(out.pixels_mut()) {
        let a = src[3] as u32;
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * a + 255 * (255 - a)) / 255) as u8;
        }
    }
    out
}

/// Paper layer with both plates multiplied on in their ink colors.
fn combine_plates(plates: &PlateTarget, config: &SheetConfig) -> RgbaImage {
    let mut out = plates.preview().image().clone();
    let layers = [
        (plates.secondary().image(), config.palette.secondary_ink),
        (plates.primary().image(), config.palette.primary_ink),
    ];
    for (plate, ink) in layers {
        for (src, dst) in plate.pixels().zip(out.pixels_mut()) {
            let a = src[3] as u32;
            if a == 0 {
                continue;
            }
            for c in 0..3 {
                let multiplied = dst[c] as u32 * ink[c] as u32 / 255;
                dst[c] = ((multiplied * a + dst[c] as u32 * (255 - a)) / 255) as u8;
            }
        }
    }
    out
}

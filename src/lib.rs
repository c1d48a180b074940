//! # Stampsheet - Generative Stamp Sheets
//!
//! Stampsheet lays out a catalog of obsolete consumer devices as a sheet of
//! procedurally decorated "stamps", one per device. It provides:
//!
//! - **Grid layout**: fixed matrix of cells with uniform gutters
//! - **Deterministic decoration**: borders, circuit traces, badges and stars
//!   seeded from `(run seed, device name)`
//! - **Two-plate separation**: line work on one ink plate, halftoned photos
//!   on the other, for two-color risograph printing
//! - **Sessions**: paging, reseeding and export as pure state transitions
//!
//! ## Quick Start
//!
//! ```
//! use stampsheet::{
//!     assets::AssetStore,
//!     catalog::Catalog,
//!     config::SheetConfig,
//!     session::Session,
//!     sheet::{RenderOutcome, SheetRenderer},
//! };
//!
//! let catalog = Catalog::from_json_str(
//!     r#"[{"name": "Nokia 3310", "years_active": "2000-2005", "category": "Mobile"}]"#,
//! )?;
//! let config = SheetConfig::from_json_str(
//!     r#"{"width": 400, "height": 300, "columns": 2, "rows": 1}"#,
//! )?;
//! let mut renderer = SheetRenderer::new(config)?;
//!
//! match renderer.render(&Session::default(), Some(&catalog), &AssetStore::new()) {
//!     RenderOutcome::Rendered(sheet) => assert_eq!(sheet.stamps.len(), 1),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), stampsheet::StampError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Grid geometry |
//! | [`catalog`] | Device records and field parsing |
//! | [`stamp`] | Seeding, borders, traces, badges, composer, render targets |
//! | [`separation`] | Auto-levels, Bayer dithering, letterbox fitting |
//! | [`canvas`] | Raster drawing surface with bitmap text |
//! | [`text`] | Word wrapping |
//! | [`assets`] | Photo loading and settle tracking |
//! | [`session`] | Session state and commands |
//! | [`sheet`] | Sheet rendering |
//! | [`export`] | PNG output |
//! | [`config`] | Sheet configuration |
//! | [`error`] | Error types |

pub mod assets;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod grain;
pub mod layout;
pub mod separation;
pub mod session;
pub mod sheet;
pub mod stamp;
pub mod text;

// Re-exports for convenience
pub use config::SheetConfig;
pub use error::StampError;
pub use session::{Command, Session};
pub use sheet::SheetRenderer;

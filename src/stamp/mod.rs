//! Procedural stamp generation.
//!
//! - [`seed`]: per-stamp seed and random stream
//! - [`border`]: the four border styles
//! - [`traces`]: circuit-trace background
//! - [`badge`]: category badges, rarity stars, price medallion
//! - [`target`]: color and ink-plate render targets
//! - [`composer`]: the per-stamp draw sequence

pub mod badge;
pub mod border;
pub mod composer;
pub mod seed;
pub mod target;
pub mod traces;

pub use badge::{Badge, rarity_stars};
pub use border::BorderStyle;
pub use composer::{StampContext, StampLayout, StampSummary, compose_stamp};
pub use seed::{StampRng, stamp_seed};
pub use target::{DirectTarget, PlateTarget, RenderTarget, ScallopStyle, StampPalette};

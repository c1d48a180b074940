//! # Layout
//!
//! Sheet geometry. The only layout primitive is a fixed [`Grid`] of equally
//! sized cells separated by gutters; stamps are placed one per cell.

pub mod grid;

pub use grid::{Grid, GridCell, GridError, Rect};

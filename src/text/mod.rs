//! # Text
//!
//! Greedy word wrapping for the stamp text block.

pub mod wrap;

pub use wrap::{fixed_width, wrap};

//! # Error Types
//!
//! This module defines error types used throughout the stampsheet library.

use thiserror::Error;

use crate::layout::GridError;

/// Main error type for stampsheet operations
#[derive(Debug, Error)]
pub enum StampError {
    /// Grid construction or lookup failure
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Record source could not be read or is malformed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Image decode, encode or processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, StampError>;

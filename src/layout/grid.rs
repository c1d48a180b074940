//! # Grid Layout
//!
//! Partitions a rectangle into `columns × rows` equal cells separated by
//! uniform gutters.
//!
//! ```text
//!  origin
//!    ┌──────┐ gx ┌──────┐ gx ┌──────┐
//!    │ 0,0  │    │ 1,0  │    │ 2,0  │
//!    └──────┘    └──────┘    └──────┘
//!       gy
//!    ┌──────┐    ┌──────┐    ┌──────┐
//!    │ 0,1  │    │ 1,1  │    │ 2,1  │
//!    └──────┘    └──────┘    └──────┘
//! ```
//!
//! ```text
//! module_width  = (width  - gutter_x * (columns - 1)) / columns
//! module_height = (height - gutter_y * (rows    - 1)) / rows
//! ```
//!
//! The grid is immutable once built. Lookups outside the grid return
//! [`GridError::OutOfBounds`]; callers treat that as "no cell" and skip.
//!
//! ## Example
//!
//! ```
//! use stampsheet::layout::Grid;
//!
//! let grid = Grid::new(0.0, 0.0, 500.0, 400.0, 5, 4, 10.0, 10.0).unwrap();
//! let cell = grid.cell(1, 0).unwrap();
//! assert_eq!(cell.x, grid.module_width() + 10.0);
//! assert!(grid.cell(5, 0).is_err());
//! ```

use thiserror::Error;

/// Grid construction and lookup failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Column/row pair outside the grid.
    #[error("cell ({column}, {row}) is outside a {columns}x{rows} grid")]
    OutOfBounds {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },

    /// Linear index outside the grid.
    #[error("cell index {index} is outside a grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Dimensions that cannot produce any cells.
    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Axis-aligned rectangle in sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `amount` on every side. Never produces a negative size.
    pub fn inset(&self, amount: f32) -> Rect {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Rect::new(self.x + amount, self.y + amount, width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// One addressable cell of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub column: usize,
    pub row: usize,
    /// Row-major linear index (`row * columns + column`).
    pub index: usize,
}

impl GridCell {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Upper bound on `columns * rows`.
pub const MAX_CELLS: usize = 4096;

/// Fixed matrix of equally sized cells.
#[derive(Debug, Clone)]
pub struct Grid {
    origin_x: f32,
    origin_y: f32,
    width: f32,
    height: f32,
    columns: usize,
    rows: usize,
    gutter_x: f32,
    gutter_y: f32,
    module_width: f32,
    module_height: f32,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Build a grid. Cells are computed once, here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin_x: f32,
        origin_y: f32,
        width: f32,
        height: f32,
        columns: usize,
        rows: usize,
        gutter_x: f32,
        gutter_y: f32,
    ) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::InvalidDimensions(format!(
                "need at least one column and row, got {}x{}",
                columns, rows
            )));
        }
        let count = columns
            .checked_mul(rows)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| {
                GridError::InvalidDimensions(format!(
                    "{}x{} cells exceeds the limit of {}",
                    columns, rows, MAX_CELLS
                ))
            })?;
        if gutter_x < 0.0 || gutter_y < 0.0 {
            return Err(GridError::InvalidDimensions(format!(
                "gutters must be non-negative, got ({}, {})",
                gutter_x, gutter_y
            )));
        }

        let module_width = (width - gutter_x * (columns - 1) as f32) / columns as f32;
        let module_height = (height - gutter_y * (rows - 1) as f32) / rows as f32;

        if !(module_width > 0.0 && module_height > 0.0) {
            return Err(GridError::InvalidDimensions(format!(
                "{}x{} area leaves no room for {}x{} cells",
                width, height, columns, rows
            )));
        }

        let mut cells = Vec::with_capacity(count);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(GridCell {
                    x: origin_x + column as f32 * (module_width + gutter_x),
                    y: origin_y + row as f32 * (module_height + gutter_y),
                    width: module_width,
                    height: module_height,
                    column,
                    row,
                    index: row * columns + column,
                });
            }
        }

        Ok(Self {
            origin_x,
            origin_y,
            width,
            height,
            columns,
            rows,
            gutter_x,
            gutter_y,
            module_width,
            module_height,
            cells,
        })
    }

    /// Look up a cell by column and row.
    pub fn cell(&self, column: usize, row: usize) -> Result<&GridCell, GridError> {
        if column >= self.columns || row >= self.rows {
            let err = GridError::OutOfBounds {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            };
            log::warn!("{}", err);
            return Err(err);
        }
        Ok(&self.cells[row * self.columns + column])
    }

    /// Look up a cell by row-major linear index.
    pub fn cell_at(&self, index: usize) -> Result<&GridCell, GridError> {
        self.cells.get(index).ok_or_else(|| {
            let err = GridError::IndexOutOfBounds {
                index,
                len: self.cells.len(),
            };
            log::warn!("{}", err);
            err
        })
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells (`columns * rows`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn module_width(&self) -> f32 {
        self.module_width
    }

    pub fn module_height(&self) -> f32 {
        self.module_height
    }

    pub fn gutter_x(&self) -> f32 {
        self.gutter_x
    }

    pub fn gutter_y(&self) -> f32 {
        self.gutter_y
    }

    /// The full area the grid was built over.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin_x, self.origin_y, self.width, self.height)
    }
}

// ============================================================================
// TESTS
// ============================================================================

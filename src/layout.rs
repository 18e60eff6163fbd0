//! Subplot grid planning shared by every EDA figure.
//!
//! The row count is `columns / per_row + 1`. When the column count divides
//! evenly this leaves one trailing row with no panels; figures keep that row
//! so their proportions match across datasets of neighbouring sizes.

use crate::error::{Error, Result};

/// Default number of panels per grid row.
pub const DEFAULT_COLUMNS_PER_ROW: usize = 5;

/// Figure width in figure units (inches at the default DPI).
pub const FIGURE_WIDTH: f32 = 20.0;

/// Height of one grid row in figure units.
pub const ROW_HEIGHT: f32 = 5.0;

/// Position of a panel in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSlot {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

/// Row/column shape and physical size of a figure grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
}

impl GridLayout {
    /// Plan a grid for `column_count` panels with at most
    /// `max_columns_per_row` panels per row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] when `max_columns_per_row` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_eda::layout::GridLayout;
    ///
    /// let grid = GridLayout::plan(10, 5).unwrap();
    /// assert_eq!(grid.rows(), 3);
    /// assert_eq!(grid.height(), 15.0);
    /// ```
    pub fn plan(column_count: usize, max_columns_per_row: usize) -> Result<Self> {
        let full_rows = column_count
            .checked_div(max_columns_per_row)
            .ok_or(Error::DivisionByZero)?;

        Ok(Self {
            rows: full_rows + 1,
            cols: max_columns_per_row,
        })
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Figure width in figure units.
    #[must_use]
    pub fn width(&self) -> f32 {
        FIGURE_WIDTH
    }

    /// Figure height in figure units.
    #[must_use]
    pub fn height(&self) -> f32 {
        ROW_HEIGHT * self.rows as f32
    }

    /// Cell for the panel at `index` (row-major).
    #[must_use]
    pub const fn slot(&self, index: usize) -> GridSlot {
        GridSlot {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    /// Pixel size of the figure at `dpi` pixels per figure unit.
    #[must_use]
    pub fn pixel_size(&self, dpi: f32) -> (u32, u32) {
        (
            (self.width() * dpi).round() as u32,
            (self.height() * dpi).round() as u32,
        )
    }
}

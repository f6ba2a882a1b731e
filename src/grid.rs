//! Drawing grid input
//!
//! The browser canvas submits a 28×28 matrix of binary cells. All shape
//! and value validation happens here, before anything touches the model.

use ndarray::Array2;

use crate::error::{Result, ScrawlError};

/// Side length of the drawing grid in cells
pub const GRID_SIDE: usize = 28;

/// Total number of cells in a flattened grid
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// A validated 28×28 binary drawing grid.
///
/// Construction goes through [`Grid::from_rows`], so a `Grid` value always
/// has exactly [`GRID_CELLS`] cells and every cell is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cells, each 0 (background) or 1 (drawn)
    cells: Vec<u8>,
}

impl Grid {
    /// Validate a nested row array into a grid.
    ///
    /// Rejects anything that is not exactly 28 rows of 28 cells, and any
    /// cell value other than 0 or 1.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != GRID_SIDE {
            return Err(ScrawlError::InvalidInputShape {
                expected: format!("{}x{} grid", GRID_SIDE, GRID_SIDE),
                actual: format!("{} rows", rows.len()),
            });
        }

        let mut cells = Vec::with_capacity(GRID_CELLS);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != GRID_SIDE {
                return Err(ScrawlError::InvalidInputShape {
                    expected: format!("{}x{} grid", GRID_SIDE, GRID_SIDE),
                    actual: format!("row {} has {} cells", y, row.len()),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                // NaN compares unequal to both accepted values and falls through
                let cell = if value == 0.0 {
                    0u8
                } else if value == 1.0 {
                    1u8
                } else {
                    return Err(ScrawlError::InvalidInputShape {
                        expected: "cell values in {0, 1}".to_string(),
                        actual: format!("cell ({}, {}) = {}", y, x, value),
                    });
                };
                cells.push(cell);
            }
        }

        Ok(Self { cells })
    }

    /// An all-background grid (empty canvas).
    pub fn blank() -> Self {
        Self {
            cells: vec![0; GRID_CELLS],
        }
    }

    /// Number of drawn cells.
    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Convert to the single-channel image the model consumes.
    ///
    /// Cells are already in the unit range, so casting to f32 is the whole
    /// normalization step.
    pub fn to_image(&self) -> Array2<f32> {
        Array2::from_shape_fn((GRID_SIDE, GRID_SIDE), |(y, x)| {
            f32::from(self.cells[y * GRID_SIDE + x])
        })
    }
}

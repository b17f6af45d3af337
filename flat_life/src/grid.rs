// grid.rs - Flat grid geometry and neighbor resolution

use std::fmt;

use crate::cell::Cell;
use crate::error::{Error, Result};

/// Size of a rectangular board stored as a flat, row-major array.
///
/// The cell at row `r`, column `c` lives at index `r * columns + c`. Both
/// sides are at least 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: usize,
    columns: usize,
}

impl Dimensions {
    /// Returns an error if either side is zero or the cell count does not
    /// fit in a `usize`.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::EmptyDimensions { rows, columns });
        }
        if rows.checked_mul(columns).is_none() {
            return Err(Error::TooLarge { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(self) -> usize {
        self.rows
    }

    pub fn columns(self) -> usize {
        self.columns
    }

    /// Number of cells on the board.
    pub fn len(self) -> usize {
        self.rows * self.columns
    }

    /// Always `false`; a board has at least one cell.
    pub fn is_empty(self) -> bool {
        false
    }

    /// Flat index of `(row, col)`, or `None` if it lies outside the grid.
    pub fn index(self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// `(row, col)` of a flat index, or `None` if it lies outside the grid.
    pub fn position(self, index: usize) -> Option<(usize, usize)> {
        (index < self.len()).then(|| (index / self.columns, index % self.columns))
    }

    /// Distinct flat indices of the up-to-8 cells adjacent to `index`.
    ///
    /// Edges are hard boundaries: a cell in the first column has no left
    /// neighbor, not one at the end of the previous row. Corner cells have 3
    /// neighbors, other edge cells 5 and interior cells 8. The cell itself is
    /// never included.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    pub fn neighbors(self, index: usize) -> impl Iterator<Item = usize> {
        let (row, col) = self.expect_position(index);
        let columns = self.columns;

        // Clamping shrinks each range at the border instead of repeating the
        // edge row or column, so every index is produced exactly once.
        let neighbor_rows = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        let neighbor_cols = col.saturating_sub(1)..=(col + 1).min(self.columns - 1);

        neighbor_rows
            .flat_map(move |r| neighbor_cols.clone().map(move |c| r * columns + c))
            .filter(move |&i| i != index)
    }

    /// Number of live cells adjacent to `index` on `cells`, in `0..=8`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid or `cells` does not have exactly
    /// one entry per grid position.
    pub fn neighbor_count(self, index: usize, cells: &[Cell]) -> usize {
        assert_eq!(
            cells.len(),
            self.len(),
            "cell slice does not match {self} grid",
        );
        self.neighbors(index)
            .filter(|&i| cells[i].is_alive())
            .count()
    }

    fn expect_position(self, index: usize) -> (usize, usize) {
        match self.position(index) {
            Some(pos) => pos,
            None => panic!("cell index {index} out of range for {self} grid"),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Counts the live neighbors of `index` on a `rows` x `columns` board.
///
/// Free-function form of [`Dimensions::neighbor_count`].
///
/// # Panics
///
/// Panics if the dimensions are empty, `index` is outside the board, or
/// `cells.len() != rows * columns`.
pub fn neighbor_count(index: usize, cells: &[Cell], rows: usize, columns: usize) -> usize {
    match Dimensions::new(rows, columns) {
        Ok(dims) => dims.neighbor_count(index, cells),
        Err(e) => panic!("{e}"),
    }
}

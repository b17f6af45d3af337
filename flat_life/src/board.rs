use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Dimensions;
use crate::rule;

/// One generation of cells, stored flat in row-major order together with the
/// grid size needed to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Wraps `cells`, which must hold exactly `dims.len()` entries.
    pub fn new(dims: Dimensions, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != dims.len() {
            return Err(Error::BoardLength {
                rows: dims.rows(),
                columns: dims.columns(),
                expected: dims.len(),
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    /// Board with every cell dead.
    pub fn dead(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::Dead; dims.len()],
        }
    }

    /// Builds a board by asking `f` for the state at each `(row, col)`.
    pub fn from_fn(dims: Dimensions, mut f: impl FnMut(usize, usize) -> Cell) -> Self {
        let cells = (0..dims.len())
            .map(|i| f(i / dims.columns(), i % dims.columns()))
            .collect();
        Self { dims, cells }
    }

    /// Random board where each cell is alive when a uniform draw from
    /// `[0, 1)` is at least `threshold`, so it is alive with probability
    /// `1 - threshold`.
    pub fn random<R: Rng + ?Sized>(dims: Dimensions, threshold: f64, rng: &mut R) -> Result<Self> {
        check_threshold(threshold)?;
        Ok(Self::sample(dims, threshold, rng))
    }

    /// [`Board::random`] for a threshold already known to be in range.
    pub(crate) fn sample<R: Rng + ?Sized>(dims: Dimensions, threshold: f64, rng: &mut R) -> Self {
        let cells = (0..dims.len())
            .map(|_| Cell::from(rng.gen_range(0.0..1.0) >= threshold))
            .collect();
        Self { dims, cells }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn get_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.dims.index(row, col).map(|i| self.cells[i])
    }

    /// Copy of this board with the cell at `index` flipped.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the board.
    pub fn toggled(&self, index: usize) -> Self {
        let mut cells = self.cells.clone();
        cells[index] = Cell::from(!cells[index].is_alive());
        Self {
            dims: self.dims,
            cells,
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Number of live cells adjacent to `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the board.
    pub fn neighbor_count(&self, index: usize) -> usize {
        self.dims.neighbor_count(index, &self.cells)
    }

    /// Live-neighbor count of every cell, in index order.
    pub fn neighbor_counts(&self) -> Vec<usize> {
        (0..self.cells.len())
            .map(|i| self.neighbor_count(i))
            .collect()
    }

    /// Computes the next generation. Every cell reads this board, never a
    /// partially updated one.
    pub fn step(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| rule::next_state(cell, self.neighbor_count(i)))
            .collect();
        Self {
            dims: self.dims,
            cells,
        }
    }

    /// Parses one line per row of cell symbols (see [`Cell::from_symbol`]).
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let columns = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(Error::EmptyText),
        };

        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != columns {
                return Err(Error::RaggedRow {
                    row,
                    expected: columns,
                    actual,
                });
            }
            for ch in line.chars() {
                cells.push(Cell::from_symbol(ch)?);
            }
        }

        Self::new(Dimensions::new(rows.len(), columns)?, cells)
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.columns()) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::Threshold(threshold))
    }
}

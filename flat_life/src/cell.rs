use std::fmt;

use crate::error::{Error, Result};

/// State of a single grid position.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Character used when printing boards.
    pub fn symbol(self) -> char {
        match self {
            Cell::Alive => 'O',
            Cell::Dead => '.',
        }
    }

    /// Reads a cell from its text form. Accepts the printed symbols plus a
    /// few common alternatives.
    pub fn from_symbol(ch: char) -> Result<Self> {
        match ch {
            'O' | 'o' | '*' | '#' | 'a' | '1' => Ok(Cell::Alive),
            '.' | '_' | 'd' | '0' => Ok(Cell::Dead),
            other => Err(Error::UnknownCell(other)),
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

use crate::board::Board;
use crate::cell::Cell;
use crate::grid::Dimensions;

/// A named starting pattern, as `(row, col)` offsets from its top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 1), (1, 2), (0, 2), (2, 1), (2, 0)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Rows spanned by the pattern.
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    /// Columns spanned by the pattern.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Board of the given size with this pattern centered on an otherwise
    /// dead grid. Cells that do not fit are dropped, not wrapped.
    pub fn place(&self, dims: Dimensions) -> Board {
        let row_offset = (dims.rows() as isize - self.height() as isize) / 2;
        let col_offset = (dims.columns() as isize - self.width() as isize) / 2;

        let mut cells = vec![Cell::Dead; dims.len()];
        for &(r, c) in self.cells {
            let row = r as isize + row_offset;
            let col = c as isize + col_offset;
            if row < 0 || col < 0 {
                continue;
            }
            if let Some(i) = dims.index(row as usize, col as usize) {
                cells[i] = Cell::Alive;
            }
        }
        Board::from_fn(dims, |r, c| cells[r * dims.columns() + c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: usize, columns: usize) -> Dimensions {
        Dimensions::new(rows, columns).unwrap()
    }

    #[test]
    fn test_find() {
        assert_eq!(find("glider").map(|p| p.name), Some("Glider"));
        assert_eq!(find("r-PENTOMINO").map(|p| p.name), Some("R-pentomino"));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn test_extents() {
        assert_eq!(find("Pulsar").unwrap().height(), 13);
        assert_eq!(find("Pulsar").unwrap().width(), 13);
        let gun = find("Gosper Glider Gun").unwrap();
        assert_eq!((gun.height(), gun.width()), (9, 36));
    }

    #[test]
    fn test_place_centered() {
        let board = find("Blinker").unwrap().place(dims(5, 5));
        assert_eq!(board.to_string(), ".....\n.....\n.OOO.\n.....\n.....\n");
    }

    #[test]
    fn test_place_clips() {
        let gun = find("Gosper Glider Gun").unwrap();
        let board = gun.place(dims(5, 5));
        assert!(board.population() < gun.cells.len());

        let full = gun.place(dims(20, 40));
        assert_eq!(full.population(), gun.cells.len());
    }

    #[test]
    fn test_all_patterns_fit_default_grid() {
        for pattern in PATTERNS {
            let board = pattern.place(dims(50, 50));
            assert_eq!(board.population(), pattern.cells.len(), "{}", pattern.name);
        }
    }
}

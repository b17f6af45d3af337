use crate::cell::Cell;

/// Conway's transition rule: the state a cell takes in the next generation
/// given its current state and number of live neighbors.
///
/// Birth on exactly 3, survival on 2 or 3, death otherwise.
pub fn next_state(cell: Cell, live_neighbors: usize) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Dead, 3) => Cell::Alive,   // Birth
        (Cell::Alive, 4..) => Cell::Dead, // Overpopulation
        (Cell::Alive, 2..=3) => Cell::Alive,
        (Cell::Alive, 0..=1) => Cell::Dead, // Underpopulation
        (Cell::Dead, _) => Cell::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth() {
        assert_eq!(next_state(Cell::Dead, 3), Cell::Alive);
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert_eq!(next_state(Cell::Dead, n), Cell::Dead, "dead with {n}");
        }
    }

    #[test]
    fn test_survival_and_death() {
        assert_eq!(next_state(Cell::Alive, 0), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 3), Cell::Alive);
        for n in 4..=8 {
            assert_eq!(next_state(Cell::Alive, n), Cell::Dead, "alive with {n}");
        }
    }
}

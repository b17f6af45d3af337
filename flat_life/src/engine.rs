use log::{debug, trace};
use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::board::{Board, check_threshold};
use crate::cell::Cell;
use crate::config::DEFAULT_THRESHOLD;
use crate::error::Result;
use crate::grid::Dimensions;

/// A cached generation: the full board plus a hash used for cycle checks.
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    hash: u64,
}

impl Snapshot {
    fn new(board: Board) -> Self {
        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            board,
        }
    }
}

/// A repeating stretch of generations found in the cache.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// First generation that recurs.
    pub start: usize,
    /// Generations between repeats; 1 is a still life.
    pub period: usize,
}

/// Game of Life engine over a fixed-size flat board.
///
/// Every generation computed so far is kept, indexed by generation number,
/// so asking for one that was already reached costs nothing. Generation 0 is
/// the initial board and is always present. Replacing the initial board (by
/// reseeding, resizing or loading) discards every cached generation.
///
/// All operations run synchronously on the caller's thread. Fallible
/// operations validate their input before touching any state, so an error
/// leaves the engine unchanged.
#[derive(Debug, Clone)]
pub struct Life {
    /// `history[g]` is the board at generation `g`. Never empty.
    history: Vec<Snapshot>,
    /// Generation of the current board.
    current: usize,
    /// Threshold used when resizing re-randomizes the board.
    threshold: f64,
}

impl Life {
    /// Engine on a random board of the given size, with about half the cells
    /// alive.
    pub fn new(dims: Dimensions) -> Self {
        Self::from_board(
            Board::sample(dims, DEFAULT_THRESHOLD, &mut rand::thread_rng()),
            DEFAULT_THRESHOLD,
        )
    }

    /// Engine on a random board where each cell is alive with probability
    /// `1 - threshold`.
    pub fn with_threshold(dims: Dimensions, threshold: f64) -> Result<Self> {
        Self::with_rng(&mut rand::thread_rng(), dims, threshold)
    }

    /// Like [`Life::with_threshold`], drawing from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R, dims: Dimensions, threshold: f64) -> Result<Self> {
        let board = Board::random(dims, threshold, rng)?;
        Ok(Self::from_board(board, threshold))
    }

    /// Engine whose generation 0 is `board`.
    pub fn with_board(board: Board) -> Self {
        Self::from_board(board, DEFAULT_THRESHOLD)
    }

    /// Engine whose generation 0 is a `rows` x `columns` board made of
    /// `cells` in row-major order.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Result<Self> {
        let board = Board::new(Dimensions::new(rows, columns)?, cells)?;
        Ok(Self::with_board(board))
    }

    fn from_board(board: Board, threshold: f64) -> Self {
        debug!(
            "new {} engine, population {}",
            board.dims(),
            board.population()
        );
        Self {
            history: vec![Snapshot::new(board)],
            current: 0,
            threshold,
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.initial_board().dims()
    }

    /// Threshold used by [`Life::resize`].
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        check_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    /// Generation 0.
    pub fn initial_board(&self) -> &Board {
        &self.history[0].board
    }

    /// Board at the most recently requested generation.
    pub fn current_board(&self) -> &Board {
        &self.history[self.current].board
    }

    /// Generation number of [`Life::current_board`].
    pub fn generation(&self) -> usize {
        self.current
    }

    /// Number of generations held in the cache, counting generation 0.
    pub fn cached_generations(&self) -> usize {
        self.history.len()
    }

    /// Board at `generation` if it has already been computed.
    pub fn cached(&self, generation: usize) -> Option<&Board> {
        self.history.get(generation).map(|s| &s.board)
    }

    /// Replaces the board with a random `rows` x `columns` one and makes it
    /// generation 0. Each cell is alive with probability `1 - threshold`.
    pub fn reseed(&mut self, rows: usize, columns: usize, threshold: f64) -> Result<&Board> {
        self.reseed_with(&mut rand::thread_rng(), rows, columns, threshold)
    }

    /// Like [`Life::reseed`], drawing from `rng`.
    pub fn reseed_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        rows: usize,
        columns: usize,
        threshold: f64,
    ) -> Result<&Board> {
        let dims = Dimensions::new(rows, columns)?;
        let board = Board::random(dims, threshold, rng)?;
        debug!("reseeding {dims} board with threshold {threshold}");
        self.threshold = threshold;
        Ok(self.restart(board))
    }

    /// Changes the board size. The old pattern is always discarded and a new
    /// random board is drawn using the engine's threshold.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<&Board> {
        self.resize_with(&mut rand::thread_rng(), rows, columns)
    }

    /// Like [`Life::resize`], drawing from `rng`.
    pub fn resize_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        rows: usize,
        columns: usize,
    ) -> Result<&Board> {
        let threshold = self.threshold;
        self.reseed_with(rng, rows, columns, threshold)
    }

    /// Makes `board` the new generation 0. Its size may differ from the
    /// current one.
    pub fn load(&mut self, board: Board) -> &Board {
        debug!(
            "loading {} board, population {}",
            board.dims(),
            board.population()
        );
        self.restart(board)
    }

    fn restart(&mut self, board: Board) -> &Board {
        self.history.clear();
        self.history.push(Snapshot::new(board));
        self.current = 0;
        self.current_board()
    }

    /// Returns the board at `target` and makes it the current board.
    ///
    /// Generations already in the cache are returned as they are. Otherwise
    /// the engine steps forward from the latest cached generation, caching
    /// each generation along the way.
    pub fn advance_to(&mut self, target: usize) -> &Board {
        if target >= self.history.len() {
            trace!(
                "advancing from generation {} to {target}",
                self.history.len() - 1
            );
        }
        while self.history.len() <= target {
            let prev = &self.history[self.history.len() - 1].board;
            let next = prev.step();
            trace!(
                "generation {} population {}",
                self.history.len(),
                next.population()
            );
            self.history.push(Snapshot::new(next));
        }
        self.current = target;
        self.current_board()
    }

    /// Advances the current board by one generation.
    pub fn step(&mut self) -> &Board {
        self.advance_to(self.current + 1)
    }

    /// Live-neighbor count of `index` on the current board.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the board.
    pub fn neighbor_count(&self, index: usize) -> usize {
        self.current_board().neighbor_count(index)
    }

    /// Live-neighbor count of every cell on the current board.
    pub fn neighbor_counts(&self) -> Vec<usize> {
        self.current_board().neighbor_counts()
    }

    /// Looks for an earlier generation identical to the current one.
    ///
    /// Only generations up to the current one are considered, so the answer
    /// depends on how far the engine has been advanced.
    pub fn cycle(&self) -> Option<Cycle> {
        let history = &self.history[..=self.current];
        let latest = &history[self.current];
        let repeat = history[..self.current]
            .iter()
            .rposition(|s| same(s, latest))?;
        let period = self.current - repeat;

        let start = (0..=repeat)
            .find(|&g| same(&history[g], &history[g + period]))
            .unwrap_or(repeat);
        Some(Cycle { start, period })
    }
}

fn same(a: &Snapshot, b: &Snapshot) -> bool {
    a.hash == b.hash && a.board == b.board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    fn dims(rows: usize, columns: usize) -> Dimensions {
        Dimensions::new(rows, columns).unwrap()
    }

    #[test]
    fn test_generation_zero_is_initial_board() {
        let start = board(".O.\n..O\nOOO");
        let mut life = Life::with_board(start.clone());
        assert_eq!(life.generation(), 0);
        assert_eq!(life.advance_to(0), &start);
        life.advance_to(4);
        assert_eq!(life.advance_to(0), &start);
        assert_eq!(life.initial_board(), &start);
    }

    #[test]
    fn test_advance_caches_intermediate_generations() {
        let mut life = Life::with_board(board(".O.\n..O\nOOO"));
        assert_eq!(life.cached_generations(), 1);
        life.advance_to(3);
        assert_eq!(life.cached_generations(), 4);
        assert_eq!(life.generation(), 3);
        assert_eq!(life.cached(2), Some(&board("...\n..O\n.OO")));
        assert_eq!(life.cached(4), None);

        // Going back serves the cache and does not truncate it.
        life.advance_to(1);
        assert_eq!(life.generation(), 1);
        assert_eq!(life.cached_generations(), 4);
    }

    #[test]
    fn test_repeat_request_leaves_cache_alone() {
        let mut life = Life::with_board(board("....\n.OO.\nO..O\n.OO."));
        let first = life.advance_to(6).clone();
        let earlier: Vec<Board> = (0..=6).map(|g| life.cached(g).unwrap().clone()).collect();
        assert_eq!(life.advance_to(6), &first);
        for (g, b) in earlier.iter().enumerate() {
            assert_eq!(life.cached(g), Some(b));
        }
    }

    #[test]
    fn test_step() {
        let mut life = Life::with_board(board(".....\n..O..\n..O..\n..O..\n....."));
        life.step();
        assert_eq!(life.generation(), 1);
        assert_eq!(life.current_board().population(), 3);
        assert_eq!(life.current_board().get_at(2, 1), Some(Cell::Alive));
    }

    #[test]
    fn test_from_cells_rejects_bad_input() {
        assert_eq!(
            Life::from_cells(0, 3, vec![]).unwrap_err(),
            Error::EmptyDimensions { rows: 0, columns: 3 }
        );
        assert!(matches!(
            Life::from_cells(2, 2, vec![Cell::Dead; 3]),
            Err(Error::BoardLength { .. })
        ));
    }

    #[test]
    fn test_reseed_clears_cache() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut life = Life::with_rng(&mut rng, dims(8, 8), 0.5).unwrap();
        life.advance_to(5);
        assert_eq!(life.cached_generations(), 6);

        life.reseed_with(&mut rng, 4, 6, 0.0).unwrap();
        assert_eq!(life.cached_generations(), 1);
        assert_eq!(life.generation(), 0);
        assert_eq!(life.dims(), dims(4, 6));
        assert_eq!(life.current_board().population(), 24);
        assert_eq!(life.cached(5), None);
    }

    #[test]
    fn test_failed_reseed_leaves_state() {
        let mut life = Life::with_board(board(".O.\n..O\nOOO"));
        life.advance_to(2);
        let before = life.clone();

        assert!(life.reseed(0, 5, 0.5).is_err());
        assert!(life.reseed(5, 5, 2.0).is_err());
        assert_eq!(life.generation(), 2);
        assert_eq!(life.cached_generations(), before.cached_generations());
        assert_eq!(life.current_board(), before.current_board());
        assert_eq!(life.threshold(), before.threshold());
    }

    #[test]
    fn test_resize_uses_engine_threshold() {
        let mut life = Life::with_threshold(dims(3, 3), 1.0).unwrap();
        life.advance_to(2);
        let resized = life.resize(5, 7).unwrap();
        assert_eq!(resized.dims(), dims(5, 7));
        assert_eq!(resized.population(), 0);
        assert_eq!(life.cached_generations(), 1);

        life.set_threshold(0.0).unwrap();
        assert_eq!(life.resize(2, 2).unwrap().population(), 4);
        assert!(life.set_threshold(-1.0).is_err());
    }

    #[test]
    fn test_load_restarts() {
        let mut life = Life::new(dims(10, 10));
        life.advance_to(3);
        let glider = board(".O..\n..O.\nOOO.\n....");
        assert_eq!(life.load(glider.clone()), &glider);
        assert_eq!(life.generation(), 0);
        assert_eq!(life.cached_generations(), 1);
        assert_eq!(life.dims(), dims(4, 4));
    }

    #[test]
    fn test_neighbor_counts_follow_current_board() {
        let mut life = Life::with_board(board(".O.\n..O\nOOO"));
        assert_eq!(life.neighbor_count(4), 5);
        assert_eq!(life.neighbor_counts(), vec![1, 1, 2, 3, 5, 3, 1, 3, 2]);
        life.advance_to(1);
        assert_eq!(life.neighbor_count(4), 4);
    }

    #[test]
    fn test_cycle_still_life() {
        let mut life = Life::with_board(board(".O.\n..O\nOOO"));
        assert_eq!(life.cycle(), None);
        life.advance_to(3);
        assert_eq!(life.cycle(), None);
        life.advance_to(4);
        assert_eq!(life.cycle(), Some(Cycle { start: 3, period: 1 }));
    }

    #[test]
    fn test_cycle_oscillator() {
        let mut life = Life::with_board(board(".....\n..O..\n..O..\n..O..\n....."));
        life.advance_to(1);
        assert_eq!(life.cycle(), None);
        life.advance_to(5);
        assert_eq!(life.cycle(), Some(Cycle { start: 0, period: 2 }));
        // Looking back from an earlier generation ignores later ones.
        life.advance_to(1);
        assert_eq!(life.cycle(), None);
    }

    #[test]
    fn test_cycle_extinction() {
        let mut life = Life::with_board(board("O"));
        life.advance_to(3);
        assert_eq!(life.cycle(), Some(Cycle { start: 1, period: 1 }));
    }
}

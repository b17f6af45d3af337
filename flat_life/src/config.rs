use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::check_threshold;
use crate::engine::Life;
use crate::error::Result;
use crate::grid::Dimensions;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLUMNS: usize = 10;
/// Default seeding threshold; cells start alive about half the time.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Settings a caller needs to set up an engine and pick a target generation.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub rows: usize,
    pub columns: usize,
    pub threshold: f64,
    pub iterations: usize,
    /// Fixed RNG seed for reproducible boards. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            threshold: DEFAULT_THRESHOLD,
            iterations: 0,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::new(self.rows, self.columns)
    }

    pub fn validate(&self) -> Result<()> {
        self.dimensions()?;
        check_threshold(self.threshold)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Engine with a random generation 0 drawn from this configuration.
    pub fn build(&self) -> Result<Life> {
        Life::with_rng(&mut self.rng(), self.dimensions()?, self.threshold)
    }
}

//! Conway's Game of Life on a bounded grid stored as a flat array.
//!
//! [`Life`] owns the board and remembers every generation it has computed,
//! so stepping backwards or re-requesting a generation is free. Neighbor
//! lookup treats the grid edges as walls: nothing wraps around.
//!
//! ```
//! use flat_life::{Board, Life};
//!
//! let start: Board = ".O.\n..O\nOOO".parse()?;
//! let mut life = Life::with_board(start);
//! assert_eq!(life.advance_to(3).to_string(), "...\n.OO\n.OO\n");
//! # Ok::<(), flat_life::Error>(())
//! ```

pub mod board;
pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rule;

pub use board::Board;
pub use cell::Cell;
pub use config::LifeConfig;
pub use engine::{Cycle, Life};
pub use error::{Error, Result};
pub use grid::{Dimensions, neighbor_count};
pub use rule::next_state;

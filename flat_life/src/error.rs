use thiserror::Error;

/// Result type for fallible engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported to callers of the engine.
///
/// Every variant describes bad input from the caller. An operation that
/// returns one of these has left the engine exactly as it was before the
/// call. Internal consistency faults, such as a neighbor index outside the
/// board, are never reported here; they panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("a board needs at least one row and one column, got {rows}x{columns}")]
    EmptyDimensions { rows: usize, columns: usize },

    #[error("a {rows}x{columns} board has more cells than can be addressed")]
    TooLarge { rows: usize, columns: usize },

    #[error("a {rows}x{columns} board has {expected} cells, got {actual}")]
    BoardLength {
        rows: usize,
        columns: usize,
        expected: usize,
        actual: usize,
    },

    #[error("threshold must be between 0.0 and 1.0, got {0}")]
    Threshold(f64),

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unrecognized cell {0:?} in board text")]
    UnknownCell(char),

    #[error("board text contains no rows")]
    EmptyText,
}

impl Error {
    /// Returns `true` for errors caused by an invalid caller-supplied
    /// parameter. At present that is every error the engine reports.
    pub fn is_invalid_parameter(&self) -> bool {
        match self {
            Error::EmptyDimensions { .. }
            | Error::TooLarge { .. }
            | Error::BoardLength { .. }
            | Error::Threshold(_)
            | Error::RaggedRow { .. }
            | Error::UnknownCell(_)
            | Error::EmptyText => true,
        }
    }
}

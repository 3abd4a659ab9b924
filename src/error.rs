//! Errors raised when the board no longer satisfies the rules engine's
//! invariants. Illegal clicks are not errors; they are reported through
//! `ClickOutcome`.

use crate::piece::Color;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The board has no king of this color, so check cannot be evaluated.
    #[error("no {0:?} king on the board")]
    KingNotFound(Color),

    /// A click addressed a square outside the 8x8 grid.
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;

use crate::types::Side;

/// Errors reported by the engine and its data contracts.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the board.
    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },

    /// Move that brackets nothing or targets an occupied cell.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("game is already over")]
    GameOver,

    /// Move requested for the side that is not due to move.
    #[error("it is {to_move:?}'s turn")]
    NotYourTurn { to_move: Side },

    #[error("no move could be selected")]
    NoMoveFound,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed persisted text. `line` is 1-based.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

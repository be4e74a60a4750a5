use thiserror::Error;

use super::types::BOARD_SIZE;

/// A rejected move. The board it was attempted on is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("position {index} is outside the board (expected 0..{})", BOARD_SIZE)]
    OutOfRange { index: usize },

    #[error("position {index} is already occupied")]
    Occupied { index: usize },

    #[error("game is already over")]
    GameOver,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected {} cells, got {got} in '{context}'", BOARD_SIZE)]
    InvalidLength { got: usize, context: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCharacter {
        character: char,
        position: usize,
        context: String,
    },
}

//! 3x3 tic-tac-toe: board state, outcome detection and the minimax opponent.

mod board;
mod bot_controller;
mod error;
mod types;
mod win_detector;

pub use board::{Board, apply_move, legal_moves};
pub use bot_controller::{best_move, pick_best, score_moves};
pub use error::{BoardParseError, InvalidMoveError};
pub use types::{BOARD_SIZE, Cell, Line, Mark, Outcome, WINNING_LINES};
pub use win_detector::{check_win, check_win_with_line, evaluate};

use std::ops::{Deref, DerefMut};

use super::board::{Board, legal_moves};
use super::types::{Cell, Mark, Outcome};
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;
const LOSS_SCORE: i32 = -10;
const DRAW_SCORE: i32 = 0;

/// A hypothetical mark placed during search. Dropping it empties the cell
/// again, so every exit path leaves the board as it was found.
struct Probe<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Probe<'a> {
    fn place(board: &'a mut Board, index: usize, mark: Mark) -> Self {
        board.set(index, Cell::Marked(mark));
        Self { board, index }
    }
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.board.set(self.index, Cell::Empty);
    }
}

/// Picks the move for `engine_mark` by exhaustive minimax.
///
/// Candidates are tried in ascending index order and a later one only wins
/// with a strictly higher score, so the lowest optimal index is returned. On
/// an empty board every opening scores a draw and the result is index 0.
///
/// Returns `None` when there is nothing to play: a full board, or a board
/// that already has a winner. The board is borrowed mutably for the search
/// and is cell-for-cell identical when this returns.
pub fn best_move(board: &mut Board, engine_mark: Mark, opponent_mark: Mark) -> Option<usize> {
    pick_best(&score_moves(board, engine_mark, opponent_mark)).map(|(index, _)| index)
}

/// First entry with the highest score. A later entry only replaces the
/// current pick when it scores strictly higher.
pub fn pick_best(scores: &[(usize, i32)]) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for &(index, score) in scores {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best
}

/// Minimax score of every legal move for `engine_mark`, in index order.
///
/// Scores are +10 for a forced win, -10 for a forced loss and 0 otherwise.
/// Depth is not taken into account: a win five plies away scores the same
/// as an immediate one.
pub fn score_moves(board: &mut Board, engine_mark: Mark, opponent_mark: Mark) -> Vec<(usize, i32)> {
    debug_assert_ne!(engine_mark, opponent_mark);

    if evaluate(board).is_terminal() {
        return Vec::new();
    }

    let mut scores = Vec::new();
    for index in legal_moves(board) {
        let mut probe = Probe::place(board, index, engine_mark);
        let score = minimax(&mut probe, false, engine_mark, opponent_mark);
        scores.push((index, score));
    }
    scores
}

fn minimax(board: &mut Board, is_maximizing: bool, engine_mark: Mark, opponent_mark: Mark) -> i32 {
    match evaluate(board) {
        Outcome::Win { winner, .. } => {
            return if winner == engine_mark { WIN_SCORE } else { LOSS_SCORE };
        }
        Outcome::Draw => return DRAW_SCORE,
        Outcome::NoResult => {}
    }

    let (mark, mut best) = if is_maximizing {
        (engine_mark, i32::MIN)
    } else {
        (opponent_mark, i32::MAX)
    };

    for index in legal_moves(board) {
        let mut probe = Probe::place(board, index, mark);
        let score = minimax(&mut probe, !is_maximizing, engine_mark, opponent_mark);
        best = if is_maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

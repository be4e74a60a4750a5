use super::board::Board;
use super::types::{Cell, Line, Mark, Outcome, WINNING_LINES};

/// First completed line in [`WINNING_LINES`] order, with its owner.
///
/// Two lines can only be complete at once on boards that legal play never
/// reaches; the earlier line is reported then.
pub fn check_win_with_line(board: &Board) -> Option<(Mark, Line)> {
    let cells = board.cells();
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match cells[a] {
            Cell::Marked(mark) if cells[b] == cells[a] && cells[c] == cells[a] => Some((mark, line)),
            _ => None,
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|(mark, _)| mark)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some((winner, line)) = check_win_with_line(board) {
        return Outcome::Win { winner, line };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::NoResult
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::BOARD_SIZE;

    fn board_with_line(line: Line, mark: Mark) -> Board {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for index in line {
            cells[index] = Cell::Marked(mark);
        }
        Board::from_cells(cells)
    }

    #[test]
    fn test_every_line_is_detected_for_both_marks() {
        for mark in [Mark::X, Mark::O] {
            for line in WINNING_LINES {
                let board = board_with_line(line, mark);
                assert_eq!(
                    evaluate(&board),
                    Outcome::Win { winner: mark, line },
                    "line {:?} for {}",
                    line,
                    mark
                );
            }
        }
    }

    #[test]
    fn test_classic_full_board_is_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_empty_and_partial_boards_have_no_result() {
        assert_eq!(evaluate(&Board::new()), Outcome::NoResult);
        let board: Board = "XO_/_X_/O__".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::NoResult);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board: Board = "XOX/OXO/OXX".parse().unwrap();
        assert_eq!(
            evaluate(&board),
            Outcome::Win { winner: Mark::X, line: [0, 4, 8] }
        );
    }

    #[test]
    fn test_earliest_line_wins_on_malformed_board() {
        let board: Board = "XXX/OOO/___".parse().unwrap();
        assert_eq!(check_win_with_line(&board), Some((Mark::X, [0, 1, 2])));

        let board: Board = "O_X/O_X/O_X".parse().unwrap();
        assert_eq!(check_win_with_line(&board), Some((Mark::O, [0, 3, 6])));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XXO/___/___".parse().unwrap();
        assert_eq!(check_win(&board), None);
    }
}

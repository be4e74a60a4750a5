use std::fmt;
use std::str::FromStr;

use super::error::{BoardParseError, InvalidMoveError};
use super::types::{BOARD_SIZE, Cell, Mark};
use super::win_detector::evaluate;

/// Nine cells in row-major order: `0 1 2 / 3 4 5 / 6 7 8`.
///
/// The board does not track whose turn it is. Alternating the marks is up to
/// whoever drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Marked(mark))
            .count()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns a copy of the board with `mark` placed at `index`.
    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<Board, InvalidMoveError> {
        if index >= BOARD_SIZE {
            return Err(InvalidMoveError::OutOfRange { index });
        }

        if evaluate(self).is_terminal() {
            return Err(InvalidMoveError::GameOver);
        }

        if !self.cells[index].is_empty() {
            return Err(InvalidMoveError::Occupied { index });
        }

        let mut next = *self;
        next.cells[index] = Cell::Marked(mark);
        Ok(next)
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }
}

pub fn legal_moves(board: &Board) -> Vec<usize> {
    board.legal_moves()
}

pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, InvalidMoveError> {
    board.apply_move(index, mark)
}

/// Parses `X`, `O` and `_` (or `.`, `-`) cells. `/` and line breaks separate rows
/// and are skipped, so `"XX_/OO_/___"` and a three-line grid read the same.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<(usize, char)> = s
            .char_indices()
            .filter(|(_, c)| !matches!(c, '/' | '\n' | '\r'))
            .collect();

        if symbols.len() != BOARD_SIZE {
            return Err(BoardParseError::InvalidLength {
                got: symbols.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (cell, &(position, character)) in cells.iter_mut().zip(symbols.iter()) {
            *cell = match character {
                'X' | 'x' => Cell::Marked(Mark::X),
                'O' | 'o' => Cell::Marked(Mark::O),
                '_' | '.' | '-' => Cell::Empty,
                _ => {
                    return Err(BoardParseError::InvalidCharacter {
                        character,
                        position,
                        context: s.to_string(),
                    });
                }
            };
        }

        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in chunk {
                let symbol = cell.mark().map_or('_', Mark::symbol);
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_full());
    }

    #[test]
    fn test_apply_move_sets_only_target_cell() {
        let before = board("X__/_O_/___");
        let after = apply_move(&before, 8, Mark::X).unwrap();

        assert_eq!(after.cell(8), Some(Cell::Marked(Mark::X)));
        for index in 0..8 {
            assert_eq!(after.cell(index), before.cell(index));
        }
        assert_eq!(before.cell(8), Some(Cell::Empty));
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        let result = Board::new().apply_move(9, Mark::X);
        assert_eq!(result, Err(InvalidMoveError::OutOfRange { index: 9 }));
    }

    #[test]
    fn test_apply_move_rejects_occupied_cell() {
        let result = board("X________").apply_move(0, Mark::O);
        assert_eq!(result, Err(InvalidMoveError::Occupied { index: 0 }));
    }

    #[test]
    fn test_apply_move_rejects_finished_game() {
        let won = board("XXX/OO_/___");
        assert_eq!(won.apply_move(5, Mark::O), Err(InvalidMoveError::GameOver));

        let drawn = board("XOX/XOO/OXX");
        assert_eq!(drawn.apply_move(0, Mark::O), Err(InvalidMoveError::GameOver));
    }

    #[test]
    fn test_legal_moves_ascending_and_empty_when_full() {
        assert_eq!(legal_moves(&board("X_O/_X_/O__")), vec![1, 3, 5, 7, 8]);
        assert!(legal_moves(&board("XOX/XOO/OXX")).is_empty());
    }

    #[test]
    fn test_count_marks() {
        let b = board("XOX/_O_/__X");
        assert_eq!(b.count(Mark::X), 3);
        assert_eq!(b.count(Mark::O), 2);
    }

    #[test]
    fn test_parse_accepts_grid_layout() {
        let grid = "XO_\n.X.\n--O";
        assert_eq!(board(grid), board("XO_/_X_/__O"));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = "XO".parse::<Board>().unwrap_err();
        assert!(matches!(err, BoardParseError::InvalidLength { got: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        let err = "XO_/_Z_/___".parse::<Board>().unwrap_err();
        assert!(matches!(
            err,
            BoardParseError::InvalidCharacter { character: 'Z', position: 5, .. }
        ));
    }

    #[test]
    fn test_display_uses_row_separators() {
        let b = board("XO_/_X_/__O");
        assert_eq!(b.to_string(), "XO_/_X_/__O");
        assert_eq!(b.to_string().parse::<Board>().unwrap(), b);
    }
}

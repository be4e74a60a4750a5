use tictactoe_common::games::tictactoe::{Board, Cell, Outcome};

const ROW_SEPARATOR: &str = "---+---+---";

/// Draws the board as a 3x3 grid. Empty cells show the number to type for
/// them and cells on a winning line are bracketed.
pub fn render_board(board: &Board, outcome: &Outcome) -> String {
    let winning_line = outcome.line();

    let rows: Vec<String> = board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let index = row * 3 + col;
                    let highlighted = winning_line.is_some_and(|line| line.contains(&index));
                    match (*cell, highlighted) {
                        (Cell::Marked(mark), true) => format!("[{}]", mark),
                        (Cell::Marked(mark), false) => format!(" {} ", mark),
                        (Cell::Empty, _) => format!(" {} ", index + 1),
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    let separator = format!("\n{}\n", ROW_SEPARATOR);
    let mut out = rows.join(separator.as_str());
    out.push('\n');
    out
}

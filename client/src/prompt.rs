use tictactoe_common::games::tictactoe::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    /// Zero-based board index. Squares are typed as 1-9.
    Place(usize),
    Hint,
    Quit,
}

/// `None` for input that is neither a square number nor a command. Numbers
/// past 9 still parse so the board can reject them as out of range.
pub fn parse_move_command(input: &str) -> Option<MoveCommand> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "hint" | "h" | "?" => return Some(MoveCommand::Hint),
        "quit" | "q" | "exit" => return Some(MoveCommand::Quit),
        _ => {}
    }

    match input.parse::<usize>() {
        Ok(square) if square >= 1 => Some(MoveCommand::Place(square - 1)),
        _ => None,
    }
}

pub fn parse_symbol(input: &str) -> Option<Mark> {
    input.parse().ok()
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

use std::time::Duration;
use tictactoe_common::games::tictactoe::{
    Board, InvalidMoveError, Mark, Outcome, apply_move, best_move, evaluate, pick_best,
    score_moves,
};
use tictactoe_common::log;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::MAX_NAME_LEN;
use crate::prompt::{MoveCommand, parse_move_command, parse_symbol, parse_yes_no};
use crate::render::render_board;
use crate::settings::SessionSettings;

const STARTING_MESSAGE: &str = "Game is starting, please wait a moment...\n";
const LOSS_MESSAGE: &str =
    "You lost. Don't worry, try again.\nHere's a tip: Try to block your opponent's winning line!\n";
const DRAW_MESSAGE: &str = "It's a draw! Try again or exit.\n";
const FAREWELL_MESSAGE: &str = "Bye bye! Thanks for playing this game!\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingName,
    AwaitingSymbolChoice,
    Countdown,
    InProgress,
    Finished(Outcome),
    AwaitingReplay,
    Exited,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_played: u32,
    pub human_wins: u32,
    pub engine_wins: u32,
    pub draws: u32,
}

/// Turn controller for one human against the minimax engine.
///
/// Owns the live board. Every half-move goes through `apply_move`, and the
/// engine is only asked for a move after `evaluate` reports the game is still
/// open.
pub struct GameSession<R, W> {
    input: R,
    output: W,
    settings: SessionSettings,
    state: SessionState,
    player_name: String,
    human_mark: Mark,
    engine_mark: Mark,
    board: Board,
    to_move: Mark,
    summary: SessionSummary,
}

impl<R, W> GameSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, settings: SessionSettings) -> Self {
        Self {
            input,
            output,
            settings,
            state: SessionState::AwaitingName,
            player_name: String::new(),
            human_mark: Mark::X,
            engine_mark: Mark::O,
            board: Board::new(),
            to_move: Mark::X,
            summary: SessionSummary::default(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs until the player leaves or input ends.
    pub async fn run(&mut self) -> io::Result<SessionSummary> {
        loop {
            self.state = match self.state {
                SessionState::AwaitingName => self.await_name().await?,
                SessionState::AwaitingSymbolChoice => self.await_symbol().await?,
                SessionState::Countdown => self.count_down().await?,
                SessionState::InProgress => self.play_half_move().await?,
                SessionState::Finished(outcome) => self.finish(outcome).await?,
                SessionState::AwaitingReplay => self.await_replay().await?,
                SessionState::Exited => return Ok(self.summary),
            };
        }
    }

    async fn await_name(&mut self) -> io::Result<SessionState> {
        if let Some(name) = self.settings.player_name.clone().filter(|n| !n.is_empty()) {
            self.player_name = name;
            return Ok(SessionState::AwaitingSymbolChoice);
        }

        self.say("Name: ").await?;
        let Some(name) = self.read_line().await? else {
            return Ok(SessionState::Exited);
        };

        if name.is_empty() {
            self.say("Please enter your name.\n").await?;
            return Ok(SessionState::AwaitingName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            self.say(&format!("Names are limited to {} characters.\n", MAX_NAME_LEN))
                .await?;
            return Ok(SessionState::AwaitingName);
        }

        self.player_name = name;
        Ok(SessionState::AwaitingSymbolChoice)
    }

    async fn await_symbol(&mut self) -> io::Result<SessionState> {
        let symbol = match self.settings.symbol {
            Some(symbol) => symbol,
            None => {
                let greeting = format!(
                    "Hello, {}! Please select your symbol (X/O): ",
                    self.player_name
                );
                self.say(&greeting).await?;
                let Some(line) = self.read_line().await? else {
                    return Ok(SessionState::Exited);
                };
                match parse_symbol(&line) {
                    Some(symbol) => symbol,
                    None => {
                        self.say("Please type X or O.\n").await?;
                        return Ok(SessionState::AwaitingSymbolChoice);
                    }
                }
            }
        };

        self.human_mark = symbol;
        self.engine_mark = symbol.opponent();
        log!(
            "{} plays {}, computer plays {}",
            self.player_name,
            self.human_mark,
            self.engine_mark
        );
        Ok(SessionState::Countdown)
    }

    async fn count_down(&mut self) -> io::Result<SessionState> {
        self.board = Board::new();
        self.to_move = Mark::X;

        self.say(STARTING_MESSAGE).await?;
        for remaining in (1..=self.settings.countdown.as_secs()).rev() {
            self.say(&format!("{}\n", remaining)).await?;
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        log!("Game {} started", self.summary.games_played + 1);
        Ok(SessionState::InProgress)
    }

    async fn play_half_move(&mut self) -> io::Result<SessionState> {
        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            return Ok(SessionState::Finished(outcome));
        }

        if self.to_move == self.engine_mark {
            self.engine_turn().await
        } else {
            self.human_turn().await
        }
    }

    async fn engine_turn(&mut self) -> io::Result<SessionState> {
        let Some(index) = best_move(&mut self.board, self.engine_mark, self.human_mark) else {
            log!("Computer found no move on {}", self.board);
            return Ok(SessionState::Finished(evaluate(&self.board)));
        };

        self.board = apply_move(&self.board, index, self.engine_mark).map_err(io::Error::other)?;
        self.to_move = self.human_mark;
        log!("Computer played {} at {}: {}", self.engine_mark, index, self.board);

        let announcement = format!("Computer ({}) plays square {}.\n", self.engine_mark, index + 1);
        self.say(&announcement).await?;
        Ok(SessionState::InProgress)
    }

    async fn human_turn(&mut self) -> io::Result<SessionState> {
        let rendered = render_board(&self.board, &Outcome::NoResult);
        self.say(&rendered).await?;
        let prompt = format!(
            "{}, your move ({}): square 1-9, 'hint' or 'quit': ",
            self.player_name, self.human_mark
        );
        self.say(&prompt).await?;

        let Some(line) = self.read_line().await? else {
            return Ok(SessionState::Exited);
        };

        match parse_move_command(&line) {
            Some(MoveCommand::Place(index)) => {
                match apply_move(&self.board, index, self.human_mark) {
                    Ok(board) => {
                        self.board = board;
                        self.to_move = self.engine_mark;
                        log!("{} played {} at {}: {}", self.player_name, self.human_mark, index, self.board);
                    }
                    Err(err) => {
                        log!("Rejected move {} from {}: {}", index, self.player_name, err);
                        self.say(&describe_rejection(err)).await?;
                    }
                }
            }
            Some(MoveCommand::Hint) => self.show_hint().await?,
            Some(MoveCommand::Quit) => {
                self.say(FAREWELL_MESSAGE).await?;
                return Ok(SessionState::Exited);
            }
            None => self.say("Please type a square number from 1 to 9.\n").await?,
        }

        Ok(SessionState::InProgress)
    }

    async fn show_hint(&mut self) -> io::Result<()> {
        let scores = score_moves(&mut self.board, self.human_mark, self.engine_mark);
        let Some((index, score)) = pick_best(&scores) else {
            return Ok(());
        };
        let verdict = match score {
            s if s > 0 => "you can force a win from there",
            0 => "it holds at least a draw",
            _ => "every move loses against perfect play",
        };
        self.say(&format!("Hint: square {} ({}).\n", index + 1, verdict)).await
    }

    async fn finish(&mut self, outcome: Outcome) -> io::Result<SessionState> {
        let rendered = render_board(&self.board, &outcome);
        self.say(&rendered).await?;

        match outcome {
            Outcome::Win { winner, line } => {
                self.summary.games_played += 1;
                if winner == self.human_mark {
                    self.summary.human_wins += 1;
                    let message = format!("{}, Congratulations you are the winner!\n", self.player_name);
                    self.say(&message).await?;
                } else {
                    self.summary.engine_wins += 1;
                    self.say(LOSS_MESSAGE).await?;
                }
                log!("{} won along {:?}: {}", winner, line, self.board);
            }
            Outcome::Draw => {
                self.summary.games_played += 1;
                self.summary.draws += 1;
                self.say(DRAW_MESSAGE).await?;
                log!("Draw: {}", self.board);
            }
            Outcome::NoResult => {}
        }

        Ok(SessionState::AwaitingReplay)
    }

    async fn await_replay(&mut self) -> io::Result<SessionState> {
        self.say("Play again? (y/n): ").await?;
        let Some(line) = self.read_line().await? else {
            return Ok(SessionState::Exited);
        };

        match parse_yes_no(&line) {
            Some(true) => Ok(SessionState::Countdown),
            Some(false) => {
                self.say(FAREWELL_MESSAGE).await?;
                Ok(SessionState::Exited)
            }
            None => {
                self.say("Please answer y or n.\n").await?;
                Ok(SessionState::AwaitingReplay)
            }
        }
    }

    /// Trimmed next line, or `None` once input is exhausted.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

fn describe_rejection(err: InvalidMoveError) -> String {
    match err {
        InvalidMoveError::OutOfRange { .. } => "Squares go from 1 to 9.\n".to_string(),
        InvalidMoveError::Occupied { index } => format!("Square {} is already taken.\n", index + 1),
        InvalidMoveError::GameOver => "The game is already over.\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_settings() -> SessionSettings {
        SessionSettings {
            player_name: None,
            symbol: None,
            countdown: Duration::ZERO,
        }
    }

    async fn play(script: &str, settings: SessionSettings) -> (SessionSummary, String) {
        let mut session = GameSession::new(script.as_bytes(), Vec::new(), settings);
        let summary = session.run().await.unwrap();
        assert_eq!(session.state(), SessionState::Exited);
        let output = String::from_utf8(session.output().clone()).unwrap();
        (summary, output)
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let (summary, output) = play("", quick_settings()).await;
        assert_eq!(summary, SessionSummary::default());
        assert_eq!(output, "Name: ");
    }

    #[tokio::test]
    async fn test_blank_name_and_bad_symbol_reprompt() {
        let (summary, output) = play("\nAda\nZ\nx\nquit\n", quick_settings()).await;
        assert_eq!(summary.games_played, 0);
        assert!(output.contains("Please enter your name."));
        assert!(output.contains("Hello, Ada! Please select your symbol (X/O): "));
        assert!(output.contains("Please type X or O."));
        assert!(output.contains(STARTING_MESSAGE));
        assert!(output.ends_with(FAREWELL_MESSAGE));
    }

    #[tokio::test]
    async fn test_engine_opens_when_human_picks_o() {
        let (_, output) = play("Bob\nO\nq\n", quick_settings()).await;
        assert!(output.contains("Computer (X) plays square 1."));
        assert!(output.contains(" X | 2 | 3 "));
    }

    #[tokio::test]
    async fn test_settings_skip_name_and_symbol_prompts() {
        let settings = SessionSettings {
            player_name: Some("Grace".to_string()),
            symbol: Some(Mark::X),
            countdown: Duration::ZERO,
        };
        let (_, output) = play("hint\nquit\n", settings).await;
        assert!(!output.contains("Name: "));
        assert!(!output.contains("select your symbol"));
        assert!(output.contains("Grace, your move (X)"));
        assert!(output.contains("Hint: square 1 (it holds at least a draw)."));
    }

    #[tokio::test]
    async fn test_rejected_moves_leave_board_unchanged() {
        let (_, output) = play("Ada\nX\n0\n10\n5\n5\nquit\n", quick_settings()).await;
        assert!(output.contains("Please type a square number from 1 to 9."));
        assert!(output.contains("Squares go from 1 to 9."));
        assert!(output.contains("Computer (O) plays square 1."));
        assert!(output.contains("Square 5 is already taken."));
    }

    #[tokio::test]
    async fn test_engine_punishes_lowest_free_square_play() {
        // Typing 1..9 in order always takes the lowest free square; occupied
        // ones are rejected and the next number is tried.
        let script = "Ada\nX\n1\n2\n3\n4\n5\n6\n7\n8\n9\nn\n";
        let (summary, output) = play(script, quick_settings()).await;

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.engine_wins, 1);
        assert_eq!(summary.human_wins, 0);
        assert!(output.contains(LOSS_MESSAGE));
        assert!(output.contains("Please answer y or n."));
        assert!(output.ends_with(FAREWELL_MESSAGE));
    }

    #[tokio::test]
    async fn test_perfect_play_ends_in_a_draw() {
        // Squares that are already taken by the time they are typed get
        // rejected, and the leftovers go to the replay prompt.
        let script = "Ada\nX\n1\n9\n8\n3\n4\n6\n7\nn\n";
        let (summary, output) = play(script, quick_settings()).await;

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.engine_wins, 0);
        assert_eq!(summary.human_wins, 0);
        assert!(output.contains(DRAW_MESSAGE));
        assert!(output.ends_with(FAREWELL_MESSAGE));
    }

    #[tokio::test]
    async fn test_countdown_ticks_each_second() {
        let settings = SessionSettings {
            countdown: Duration::from_secs(1),
            ..quick_settings()
        };
        let (_, output) = play("Ada\nX\nquit\n", settings).await;
        assert!(output.contains(&format!("{}1\n", STARTING_MESSAGE)));
    }

    #[tokio::test]
    async fn test_play_again_resets_the_board() {
        let script = "Ada\nX\n1\n2\n3\n4\ny\n1\n2\n3\n4\nn\n";
        let (summary, output) = play(script, quick_settings()).await;

        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.engine_wins, 2);
        assert_eq!(output.matches(STARTING_MESSAGE).count(), 2);
    }
}

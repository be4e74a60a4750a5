use std::time::Duration;
use tictactoe_common::games::tictactoe::Mark;

use crate::config::ClientConfig;

/// What the session needs to know before the first prompt. Anything left as
/// `None` is asked for interactively.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub player_name: Option<String>,
    pub symbol: Option<Mark>,
    pub countdown: Duration,
}

impl From<&ClientConfig> for SessionSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            player_name: config
                .player_name
                .as_ref()
                .map(|name| name.trim().to_string()),
            symbol: config.symbol,
            countdown: Duration::from_secs(config.countdown_secs as u64),
        }
    }
}

mod config;
mod prompt;
mod render;
mod session;
mod settings;

use clap::Parser;
use tictactoe_common::config::{ConfigManager, Validate};
use tictactoe_common::games::tictactoe::Mark;
use tictactoe_common::{log, logger};
use tokio::io::BufReader;

use config::{ClientConfig, get_config_manager};
use session::GameSession;
use settings::SessionSettings;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against a minimax opponent")]
struct Args {
    /// YAML config file. Defaults to tictactoe_client_config.yaml next to the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    name: Option<String>,

    /// X moves first; picking O lets the computer open.
    #[arg(long)]
    symbol: Option<Mark>,

    #[arg(long)]
    countdown_secs: Option<u32>,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_to(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(name) = &self.name {
            config.player_name = Some(name.clone());
        }
        if let Some(symbol) = self.symbol {
            config.symbol = Some(symbol);
        }
        if let Some(countdown_secs) = self.countdown_secs {
            config.countdown_secs = countdown_secs;
        }
        config.use_log_prefix |= self.use_log_prefix;
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let config = args.apply_to(config_manager.get_config()?);
    config.validate()?;

    let prefix = config.use_log_prefix.then(|| "Client".to_string());
    logger::init_logger(prefix);
    log!("Starting tic-tac-toe client");

    let mut session = GameSession::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        SessionSettings::from(&config),
    );
    let summary = session.run().await?;

    log!(
        "Session over: {} games, {} won by player, {} by computer, {} drawn",
        summary.games_played,
        summary.human_wins,
        summary.engine_wins,
        summary.draws
    );
    Ok(())
}

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::Mark;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub const MAX_COUNTDOWN_SECS: u32 = 30;
pub const MAX_NAME_LEN: usize = 32;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub player_name: Option<String>,
    pub symbol: Option<Mark>,
    pub countdown_secs: u32,
    pub use_log_prefix: bool,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.countdown_secs > MAX_COUNTDOWN_SECS {
            return Err(format!(
                "countdown_secs must not exceed {} (got {})",
                MAX_COUNTDOWN_SECS, self.countdown_secs
            ));
        }
        if let Some(name) = &self.player_name {
            if name.trim().is_empty() {
                return Err("player_name must not be blank".to_string());
            }
            if name.chars().count() > MAX_NAME_LEN {
                return Err(format!("player_name must be at most {} characters", MAX_NAME_LEN));
            }
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player_name: None,
            symbol: None,
            countdown_secs: 5,
            use_log_prefix: false,
        }
    }
}

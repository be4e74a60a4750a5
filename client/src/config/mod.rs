mod config;

pub use config::{ClientConfig, MAX_NAME_LEN, get_config_manager};

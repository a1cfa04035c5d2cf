mod config_content_provider;
mod config_serializer;
mod game_config;

pub use config_content_provider::FileContentConfigProvider;
pub use config_serializer::YamlConfigSerializer;
pub use game_config::{DEFAULT_CONFIG_FILE, GameConfig, MAX_BOARD_SIZE, load_config, save_config};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

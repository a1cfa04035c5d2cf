use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{
    DEFAULT_BOARD_SIZE, DEFAULT_COMPUTER_LABEL, DEFAULT_HUMAN_LABEL, Player, TicTacToeGame,
    default_players,
};
use crate::log;
use super::{FileContentConfigProvider, Validate, YamlConfigSerializer};

pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.yaml";

// Full-depth search on anything larger does not finish in reasonable time.
pub const MAX_BOARD_SIZE: usize = 3;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub board_size: usize,
    pub players: Vec<Player>,
    pub computer_label: char,
    pub human_label: char,
    #[serde(default = "default_computer_starts")]
    pub computer_starts: bool,
}

fn default_computer_starts() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            players: default_players(),
            computer_label: DEFAULT_COMPUTER_LABEL,
            human_label: DEFAULT_HUMAN_LABEL,
            computer_starts: default_computer_starts(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(format!(
                "board_size must be between 1 and {}",
                MAX_BOARD_SIZE
            ));
        }
        if self.players.len() < 2 {
            return Err("At least 2 players are required".to_string());
        }

        let mut labels = HashSet::new();
        for player in &self.players {
            if player.label.is_whitespace() {
                return Err("Player labels must be visible characters".to_string());
            }
            if !labels.insert(player.label) {
                return Err(format!("Duplicate player label '{}'", player.label));
            }
        }

        if self.computer_label == self.human_label {
            return Err("computer_label and human_label must differ".to_string());
        }
        if !labels.contains(&self.computer_label) {
            return Err(format!(
                "computer_label '{}' does not match any player",
                self.computer_label
            ));
        }
        if !labels.contains(&self.human_label) {
            return Err(format!(
                "human_label '{}' does not match any player",
                self.human_label
            ));
        }
        Ok(())
    }
}

impl GameConfig {
    pub fn starting_label(&self) -> char {
        if self.computer_starts {
            self.computer_label
        } else {
            self.human_label
        }
    }

    /// Builds a fresh game with the turn on the configured starter.
    pub fn create_game(&self) -> Result<TicTacToeGame, String> {
        self.validate()?;
        let mut game = TicTacToeGame::new(
            self.players.clone(),
            self.board_size,
            self.computer_label,
            self.human_label,
        )?;
        game.set_current_player(self.starting_label())?;
        Ok(game)
    }
}

/// Reads `path`, falling back to the default config when the file is absent.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig, String> {
    let provider = FileContentConfigProvider::new(path);
    match provider.get_config_content()? {
        Some(content) => {
            let config = YamlConfigSerializer::new().deserialize(&content)?;
            log!("Loaded config from {}", provider.path().display());
            Ok(config)
        }
        None => {
            log!(
                "No config at {}, using defaults",
                provider.path().display()
            );
            Ok(GameConfig::default())
        }
    }
}

pub fn save_config(path: impl AsRef<Path>, config: &GameConfig) -> Result<(), String> {
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    let content = YamlConfigSerializer::new().serialize(config)?;
    FileContentConfigProvider::new(path).set_config_content(&content)
}

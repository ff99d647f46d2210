use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::time::Duration;

use crate::ai::Difficulty;
use crate::grid::{GridConfig, WrapPolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// One human snake.
    Classic,
    /// Human snake plus a computer-controlled opponent.
    VersusAi,
}

/// The whole configuration surface of the core. Loadable from a YAML file;
/// every field has a default, so a partial (or missing) file works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub grid_size: i32,
    pub wrap_policy: WrapPolicy,
    pub game_mode: GameMode,
    pub player_move_interval_ms: u64,
    pub ai_move_interval_ms: u64,
    pub ai_difficulty: Difficulty,
    pub initial_snake_length: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 20,
            wrap_policy: WrapPolicy::Wrap,
            game_mode: GameMode::Classic,
            player_move_interval_ms: 120,
            ai_move_interval_ms: 150,
            ai_difficulty: Difficulty::Medium,
            initial_snake_length: 5,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 5 {
            return Err("Grid size must be at least 5".to_string());
        }
        if self.player_move_interval_ms == 0 || self.ai_move_interval_ms == 0 {
            return Err("Move intervals must be positive".to_string());
        }
        if self.initial_snake_length < 1 {
            return Err("Initial snake length must be at least 1".to_string());
        }
        if self.initial_snake_length as i32 > self.grid_size {
            return Err("Initial snake length must fit on the grid".to_string());
        }
        Ok(())
    }

    pub fn player_move_interval(&self) -> Duration {
        Duration::from_millis(self.player_move_interval_ms)
    }

    pub fn ai_move_interval(&self) -> Duration {
        Duration::from_millis(self.ai_move_interval_ms)
    }

    pub fn grid(&self) -> GridConfig {
        GridConfig::new(self.grid_size, self.wrap_policy)
    }

    /// Missing file means defaults; an unreadable or invalid file is an
    /// error.
    pub fn load_from_file(path: &str) -> Result<GameSettings, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings: GameSettings = serde_yaml_ng::from_str(&content)
                    .map_err(|e| format!("Failed to deserialize settings: {}", e))?;
                settings
                    .validate()
                    .map_err(|e| format!("Settings validation error: {}", e))?;
                Ok(settings)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(GameSettings::default()),
            Err(err) => Err(format!("Failed to read settings file: {}", err)),
        }
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        self.validate()
            .map_err(|e| format!("Settings validation error: {}", e))?;
        let content = serde_yaml_ng::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }
}

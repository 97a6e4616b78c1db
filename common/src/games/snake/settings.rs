use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{GameMode, PlayerMode, Point};

pub const DEFAULT_GRID_SIZE: i32 = 20;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
pub const DEFAULT_GAME_DURATION_SECONDS: u32 = 60;
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_millis(1000);

/// Per-game configuration, fixed once the engine is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub mode: GameMode,
    pub player_mode: PlayerMode,
    pub grid_size: i32,
    pub tick_interval_ms: u64,
    pub game_duration_seconds: u32,
    pub player_names: Vec<String>,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            player_mode: PlayerMode::default(),
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            game_duration_seconds: DEFAULT_GAME_DURATION_SECONDS,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn new(mode: GameMode, player_mode: PlayerMode) -> Self {
        Self {
            mode,
            player_mode,
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn player_name(&self, index: usize) -> String {
        self.player_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", index + 1))
    }

    /// Player 1 starts on the left heading right, player 2 on the right heading left.
    pub fn start_position(&self, index: usize) -> Point {
        let y = self.grid_size / 2;
        match index {
            0 => Point::new(self.grid_size / 4, y),
            _ => Point::new(self.grid_size * 3 / 4, y),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(5..=100).contains(&self.grid_size) {
            return Err("Grid size must be between 5 and 100".to_string());
        }
        if !(20..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        if !(1..=3600).contains(&self.game_duration_seconds) {
            return Err("Game duration must be between 1 and 3600 seconds".to_string());
        }
        let required = self.player_mode.snake_count();
        if self.player_names.len() < required {
            return Err(format!("{} mode needs {} player names", self.player_mode, required));
        }
        if self.player_names.iter().take(required).any(|name| name.trim().is_empty()) {
            return Err("Player names must not be empty".to_string());
        }
        Ok(())
    }
}

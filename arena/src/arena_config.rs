use serde::{Deserialize, Serialize};

use arena_common::config::Validate;
use arena_common::games::snake::GameSettings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BotType {
    /// Heads for the nearest food, falling back to a random safe turn.
    #[default]
    Greedy,
    Random,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    pub player1: BotType,
    pub player2: BotType,
}

impl BotSettings {
    pub fn bot_for(&self, index: usize) -> BotType {
        match index {
            0 => self.player1,
            _ => self.player2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub game: GameSettings,
    pub bots: BotSettings,
    pub log_prefix: Option<String>,
}

impl Validate for ArenaConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.log_prefix.as_ref().is_some_and(|prefix| prefix.trim().is_empty()) {
            return Err("Log prefix must not be blank".to_string());
        }
        Ok(())
    }
}

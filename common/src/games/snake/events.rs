use serde::Serialize;

use crate::SnakeId;
use super::types::{DeathReason, Point, Winner};

/// Notable things that happened during one clock update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameEvent {
    FoodEaten { snake_id: SnakeId, at: Point, score: u32 },
    FoodSpawned { at: Point },
    SnakeDied { snake_id: SnakeId, reason: DeathReason, at: Point },
    GameFinished { winner: Winner },
}

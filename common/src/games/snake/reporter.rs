use std::future::Future;

use serde::Serialize;

use crate::SnakeId;
use super::game_state::GameState;
use super::types::{GameMode, PlayerMode, Winner};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerResult {
    pub snake_id: SnakeId,
    pub name: String,
    pub score: u32,
    pub alive: bool,
}

/// Final outcome of one game, handed to a [`ResultReporter`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameReport {
    pub players: Vec<PlayerResult>,
    pub winner: Winner,
    pub mode: GameMode,
    pub player_mode: PlayerMode,
    pub duration_seconds: u32,
}

impl GameReport {
    /// `None` until the game has a winner.
    pub fn from_state(state: &GameState) -> Option<Self> {
        let winner = state.winner.clone()?;
        let players = state
            .snakes
            .iter()
            .enumerate()
            .map(|(index, snake)| PlayerResult {
                snake_id: snake.id.clone(),
                name: state.player_name(index).to_string(),
                score: snake.score,
                alive: snake.is_alive(),
            })
            .collect();

        Some(Self {
            players,
            winner,
            mode: state.mode,
            player_mode: state.player_mode,
            duration_seconds: state.elapsed_seconds(),
        })
    }
}

/// Receives the result of every finished game. Called once per game, fire-and-forget.
pub trait ResultReporter: Send + Sync + 'static {
    fn report(&self, report: GameReport) -> impl Future<Output = Result<(), String>> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResultReporter;

impl ResultReporter for NoopResultReporter {
    async fn report(&self, _report: GameReport) -> Result<(), String> {
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::GameId;
use crate::games::snake::{GameMode, GameReport, GameState, GameStatus, PlayerMode};

/// Stored outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: String,
    pub player1: String,
    /// `None` in single-player games.
    pub player2: Option<String>,
    pub winner: String,
    pub player1_score: u32,
    pub player2_score: Option<u32>,
    pub mode: GameMode,
    pub player_mode: PlayerMode,
    pub duration: u32,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

impl GameResult {
    pub fn from_report(id: String, report: &GameReport, timestamp: i64) -> Self {
        let first = report.players.first();
        let second = report.players.get(1);

        Self {
            id,
            player1: first.map(|p| p.name.clone()).unwrap_or_default(),
            player2: second.map(|p| p.name.clone()),
            winner: report.winner.display_name().to_string(),
            player1_score: first.map_or(0, |p| p.score),
            player2_score: second.map(|p| p.score),
            mode: report.mode,
            player_mode: report.player_mode,
            duration: report.duration_seconds,
            timestamp,
        }
    }
}

/// Spectator view of a game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveGame {
    pub id: GameId,
    pub player1: String,
    pub player2: Option<String>,
    pub player1_score: u32,
    pub player2_score: Option<u32>,
    pub mode: GameMode,
    pub status: GameStatus,
    pub time_remaining: u32,
    pub player1_alive: bool,
    pub player2_alive: Option<bool>,
}

impl LiveGame {
    pub fn from_snapshot(id: &GameId, state: &GameState) -> Self {
        let first = state.snakes.first();
        let second = state.snakes.get(1);

        Self {
            id: id.clone(),
            player1: state.player_name(0).to_string(),
            player2: second.map(|_| state.player_name(1).to_string()),
            player1_score: first.map_or(0, |s| s.score),
            player2_score: second.map(|s| s.score),
            mode: state.mode,
            status: state.status,
            time_remaining: state.time_remaining,
            player1_alive: first.is_some_and(|s| s.is_alive()),
            player2_alive: second.map(|s| s.is_alive()),
        }
    }
}

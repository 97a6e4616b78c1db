use std::cmp::Ordering;

use serde::Serialize;

use crate::SnakeId;
use crate::games::SessionRng;
use super::collision;
use super::events::GameEvent;
use super::food::{self, FOOD_TARGET_COUNT, Food};
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{DeathReason, Direction, GameMode, GameStatus, PlayerMode, Winner};

const SNAKE_COLORS: [&str; 2] = ["snake1", "snake2"];

/// Authoritative snapshot of one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    /// Turn order; fixed size for the whole game.
    pub snakes: Vec<Snake>,
    pub food: Vec<Food>,
    pub grid_size: i32,
    pub mode: GameMode,
    pub player_mode: PlayerMode,
    pub status: GameStatus,
    pub time_remaining: u32,
    pub winner: Option<Winner>,
    pub player_names: Vec<String>,
    pub game_duration_seconds: u32,
    pub tick: u64,
}

impl GameState {
    /// Fresh game: starting snakes, no food, full time budget, waiting.
    pub fn new(settings: &GameSettings) -> Self {
        let snakes = (0..settings.player_mode.snake_count())
            .map(|index| {
                let direction = if index == 0 { Direction::Right } else { Direction::Left };
                Snake::new(
                    SnakeId::for_index(index),
                    settings.start_position(index),
                    direction,
                    SNAKE_COLORS[index % SNAKE_COLORS.len()],
                )
            })
            .collect();

        let player_names = (0..settings.player_mode.snake_count())
            .map(|index| settings.player_name(index))
            .collect();

        Self {
            snakes,
            food: Vec::new(),
            grid_size: settings.grid_size,
            mode: settings.mode,
            player_mode: settings.player_mode,
            status: GameStatus::Waiting,
            time_remaining: settings.game_duration_seconds,
            winner: None,
            player_names,
            game_duration_seconds: settings.game_duration_seconds,
            tick: 0,
        }
    }

    pub fn snake(&self, snake_id: &SnakeId) -> Option<&Snake> {
        self.snakes.iter().find(|s| &s.id == snake_id)
    }

    pub fn player_name(&self, index: usize) -> &str {
        self.player_names.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.is_alive()).count()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.game_duration_seconds.saturating_sub(self.time_remaining)
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Places the initial food items once the food list is empty.
    pub fn init_food(&mut self, rng: &mut SessionRng) -> Vec<GameEvent> {
        if !self.food.is_empty() || self.is_finished() {
            return Vec::new();
        }
        self.replenish_food(rng)
    }

    pub fn start(&mut self) -> bool {
        self.transition(GameStatus::Waiting, GameStatus::Playing)
    }

    pub fn pause(&mut self) -> bool {
        self.transition(GameStatus::Playing, GameStatus::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(GameStatus::Paused, GameStatus::Playing)
    }

    fn transition(&mut self, from: GameStatus, to: GameStatus) -> bool {
        if self.status != from {
            return false;
        }
        self.status = to;
        true
    }

    /// Queues a turn for the next tick. A 180° reversal of the committed direction is dropped.
    pub fn set_snake_direction(&mut self, snake_id: &SnakeId, direction: Direction) -> bool {
        match self.snakes.iter_mut().find(|s| &s.id == snake_id) {
            Some(snake) if !direction.is_opposite(&snake.direction) => {
                snake.next_direction = direction;
                true
            }
            _ => false,
        }
    }

    /// One simulation step. Does nothing unless the game is playing.
    pub fn update(&mut self, rng: &mut SessionRng) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        self.tick += 1;
        let mut events = self.move_snakes();

        if self.player_mode == PlayerMode::Multiplayer {
            events.extend(self.resolve_opponent_collisions());
        }

        events.extend(self.consume_food());
        events.extend(self.replenish_food(rng));
        events.extend(self.check_game_over());
        events
    }

    /// One second of the game clock, floored at zero.
    pub fn countdown(&mut self) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return Vec::new();
        }
        self.check_game_over().into_iter().collect()
    }

    fn move_snakes(&mut self) -> Vec<GameEvent> {
        let mode = self.mode;
        let grid_size = self.grid_size;
        let mut events = Vec::new();

        for snake in self.snakes.iter_mut().filter(|s| s.is_alive()) {
            match collision::next_head(snake, mode, grid_size) {
                Ok(new_head) => snake.advance(new_head),
                Err(reason) => {
                    snake.kill(reason);
                    events.push(GameEvent::SnakeDied {
                        snake_id: snake.id.clone(),
                        reason,
                        at: snake.head(),
                    });
                }
            }
        }

        events
    }

    fn resolve_opponent_collisions(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for index in collision::opponent_collisions(&self.snakes) {
            let snake = &mut self.snakes[index];
            if snake.kill(DeathReason::OtherSnakeCollision) {
                events.push(GameEvent::SnakeDied {
                    snake_id: snake.id.clone(),
                    reason: DeathReason::OtherSnakeCollision,
                    at: snake.head(),
                });
            }
        }

        events
    }

    fn consume_food(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for snake in self.snakes.iter_mut().filter(|s| s.is_alive()) {
            let head = snake.head();
            if let Some(index) = self.food.iter().position(|f| f.position == head) {
                self.food.remove(index);
                snake.grow();
                events.push(GameEvent::FoodEaten {
                    snake_id: snake.id.clone(),
                    at: head,
                    score: snake.score,
                });
            }
        }

        events
    }

    fn replenish_food(&mut self, rng: &mut SessionRng) -> Vec<GameEvent> {
        food::ensure_count(&mut self.food, &self.snakes, FOOD_TARGET_COUNT, self.grid_size, rng)
            .into_iter()
            .map(|item| GameEvent::FoodSpawned { at: item.position })
            .collect()
    }

    fn check_game_over(&mut self) -> Option<GameEvent> {
        let alive = self.alive_count();
        let time_up = self.time_remaining == 0;

        let winner = match self.player_mode {
            PlayerMode::Single => {
                if alive > 0 && !time_up {
                    return None;
                }
                if alive == 0 {
                    Winner::GameOver
                } else {
                    Winner::Player(self.player_name(0).to_string())
                }
            }
            PlayerMode::Multiplayer => {
                if alive > 1 && !time_up {
                    return None;
                }
                match self.snakes.iter().position(Snake::is_alive) {
                    Some(survivor) if alive == 1 => Winner::Player(self.player_name(survivor).to_string()),
                    _ => self.winner_by_score(),
                }
            }
        };

        self.status = GameStatus::Finished;
        self.winner = Some(winner.clone());
        Some(GameEvent::GameFinished { winner })
    }

    fn winner_by_score(&self) -> Winner {
        let first = self.snakes.first().map_or(0, |s| s.score);
        let second = self.snakes.get(1).map_or(0, |s| s.score);
        match first.cmp(&second) {
            Ordering::Greater => Winner::Player(self.player_name(0).to_string()),
            Ordering::Less => Winner::Player(self.player_name(1).to_string()),
            Ordering::Equal => Winner::Draw,
        }
    }
}

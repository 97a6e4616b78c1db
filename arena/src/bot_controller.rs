use arena_common::SnakeId;
use arena_common::games::SessionRng;
use arena_common::games::snake::{Direction, GameMode, GameState, Point, grid};

use crate::arena_config::BotType;

pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_type: BotType,
        snake_id: &SnakeId,
        state: &GameState,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        match bot_type {
            BotType::Greedy => Self::greedy(snake_id, state, rng),
            BotType::Random => Self::random_safe_move(snake_id, state, rng),
        }
    }

    fn greedy(snake_id: &SnakeId, state: &GameState, rng: &mut SessionRng) -> Option<Direction> {
        let snake = state.snake(snake_id)?;
        if !snake.is_alive() {
            return None;
        }

        let head = snake.head();
        let Some(nearest_food) = Self::find_nearest_food(head, state) else {
            return Self::random_safe_move(snake_id, state, rng);
        };

        let mut best_dir = None;
        let mut best_distance = i32::MAX;

        for dir in Self::get_valid_directions(snake.direction) {
            if let Some(next_pos) = Self::calculate_next_position(head, dir, state)
                && Self::is_safe_position(next_pos, state)
            {
                let distance = Self::distance(next_pos, nearest_food, state);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_safe_move(snake_id, state, rng))
    }

    /// Keeps the current heading when every turn is fatal.
    fn random_safe_move(snake_id: &SnakeId, state: &GameState, rng: &mut SessionRng) -> Option<Direction> {
        let snake = state.snake(snake_id)?;
        if !snake.is_alive() {
            return None;
        }

        let head = snake.head();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(snake.direction)
            .into_iter()
            .filter(|&dir| {
                Self::calculate_next_position(head, dir, state).is_some_and(|pos| Self::is_safe_position(pos, state))
            })
            .collect();

        if safe_directions.is_empty() {
            Some(snake.direction)
        } else {
            let idx = rng.random_range(0..safe_directions.len());
            Some(safe_directions[idx])
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn find_nearest_food(from: Point, state: &GameState) -> Option<Point> {
        state
            .food
            .iter()
            .map(|food| food.position)
            .min_by_key(|&position| Self::distance(from, position, state))
    }

    fn distance(a: Point, b: Point, state: &GameState) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();

        match state.mode {
            GameMode::Walls => dx + dy,
            GameMode::PassThrough => dx.min(state.grid_size - dx) + dy.min(state.grid_size - dy),
        }
    }

    fn calculate_next_position(from: Point, direction: Direction, state: &GameState) -> Option<Point> {
        let next = grid::step(from, direction);
        match state.mode {
            GameMode::Walls => grid::in_bounds(next, state.grid_size).then_some(next),
            GameMode::PassThrough => Some(grid::wrap(next, state.grid_size)),
        }
    }

    /// Every body cell is a hazard, own tail and dead snakes included.
    fn is_safe_position(pos: Point, state: &GameState) -> bool {
        !state.snakes.iter().any(|snake| snake.occupies(pos))
    }
}

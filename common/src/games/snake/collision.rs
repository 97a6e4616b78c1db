use super::grid;
use super::snake::Snake;
use super::types::{DeathReason, GameMode, Point};

/// Wall and self checks for one snake's next move.
///
/// The self check runs against the body before the move, tail cell included, so a snake
/// can never step into the cell its tail is about to leave.
pub fn next_head(snake: &Snake, mode: GameMode, grid_size: i32) -> Result<Point, DeathReason> {
    let candidate = grid::step(snake.head(), snake.next_direction);

    let candidate = match mode {
        GameMode::PassThrough => grid::wrap(candidate, grid_size),
        GameMode::Walls => {
            if !grid::in_bounds(candidate, grid_size) {
                return Err(DeathReason::WallCollision);
            }
            candidate
        }
    };

    if snake.occupies(candidate) {
        return Err(DeathReason::SelfCollision);
    }

    Ok(candidate)
}

/// Indices of alive snakes whose head lies on any segment of another snake.
///
/// Uses post-move bodies. Dead snakes are still hazards but are never returned.
pub fn opponent_collisions(snakes: &[Snake]) -> Vec<usize> {
    snakes
        .iter()
        .enumerate()
        .filter(|(_, snake)| snake.is_alive())
        .filter(|(index, snake)| {
            let head = snake.head();
            snakes
                .iter()
                .enumerate()
                .any(|(other_index, other)| other_index != *index && other.occupies(head))
        })
        .map(|(index, _)| index)
        .collect()
}

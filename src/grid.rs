use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// A cell on the play field. Coordinates are signed so that a move can be
/// expressed before wrapping; every position handed out by the core has
/// already been wrapped (or rejected) into `0..grid_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Maps both axes into `0..grid_size`, treating the field as a torus.
    pub fn wrapped(self, grid_size: i32) -> Self {
        Self {
            x: self.x.rem_euclid(grid_size),
            y: self.y.rem_euclid(grid_size),
        }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order doubles as the tie-break order wherever directions
    /// are scored and sorted.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step in a y-up coordinate system.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Sprite rotation in radians. Only the rendering layer cares.
    pub fn angle(self) -> f32 {
        match self {
            Direction::Up => FRAC_PI_2,
            Direction::Down => -FRAC_PI_2,
            Direction::Left => PI,
            Direction::Right => 0.0,
        }
    }
}

/// What happens at the edge of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Moving past an edge re-enters on the opposite side.
    Wrap,
    /// Moving past an edge is a wall collision.
    Bounded,
}

#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    pub size: i32,
    pub policy: WrapPolicy,
}

impl GridConfig {
    pub fn new(size: i32, policy: WrapPolicy) -> Self {
        Self { size, policy }
    }

    /// Cell reached by one step from `from`, or `None` when the step runs
    /// into a wall under the bounded policy. The wall check happens before
    /// any wrapping.
    pub fn next_position(&self, from: GridPosition, direction: Direction) -> Option<GridPosition> {
        let raw = from.offset(direction);
        match self.policy {
            WrapPolicy::Wrap => Some(raw.wrapped(self.size)),
            WrapPolicy::Bounded => raw.in_bounds(self.size).then_some(raw),
        }
    }

    /// Neighbor under toroidal arithmetic regardless of the configured
    /// policy. The opponent heuristic reasons this way even on a bounded
    /// field.
    pub fn wrapped_neighbor(&self, from: GridPosition, direction: Direction) -> GridPosition {
        from.offset(direction).wrapped(self.size)
    }

    /// Manhattan distance where each axis takes the shorter of the direct
    /// and the wrap-around way.
    pub fn toroidal_distance(&self, a: GridPosition, b: GridPosition) -> i32 {
        let axis = |from: i32, to: i32| {
            let d = (from - to).abs();
            d.min(self.size - d)
        };
        axis(a.x, b.x) + axis(a.y, b.y)
    }
}

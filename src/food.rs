use std::collections::HashSet;

use crate::grid::GridPosition;
use crate::session_rng::SessionRng;

pub struct FoodSpawner;

impl FoodSpawner {
    const MAX_ATTEMPTS: usize = 100;

    /// Picks a cell for the next piece of food by rejection sampling: up to
    /// 100 uniform draws over the whole field, skipping occupied cells. If
    /// every draw lands on a snake, the last draw is accepted anyway —
    /// placement never blocks and never fails, an overlapping food beats no
    /// food at all.
    pub fn place(
        rng: &mut SessionRng,
        grid_size: i32,
        occupied: &HashSet<GridPosition>,
    ) -> GridPosition {
        let mut pos = GridPosition::new(0, 0);
        for _ in 0..Self::MAX_ATTEMPTS {
            pos = GridPosition::new(
                rng.random_range(0..grid_size),
                rng.random_range(0..grid_size),
            );
            if !occupied.contains(&pos) {
                return pos;
            }
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_avoids_occupied_cells() {
        let mut rng = SessionRng::new(42);
        // Block out the whole left half of a 10x10 field.
        let occupied: HashSet<GridPosition> = (0..5)
            .flat_map(|x| (0..10).map(move |y| GridPosition::new(x, y)))
            .collect();

        for _ in 0..50 {
            let pos = FoodSpawner::place(&mut rng, 10, &occupied);
            assert!(pos.in_bounds(10));
            assert!(!occupied.contains(&pos));
        }
    }

    #[test]
    fn test_place_on_full_grid_still_returns_a_cell() {
        let mut rng = SessionRng::new(7);
        let occupied: HashSet<GridPosition> = (0..5)
            .flat_map(|x| (0..5).map(move |y| GridPosition::new(x, y)))
            .collect();

        let pos = FoodSpawner::place(&mut rng, 5, &occupied);
        assert!(pos.in_bounds(5));
    }

    #[test]
    fn test_place_is_deterministic_for_a_seed() {
        let occupied = HashSet::new();
        let mut a = SessionRng::new(123);
        let mut b = SessionRng::new(123);
        for _ in 0..10 {
            assert_eq!(
                FoodSpawner::place(&mut a, 20, &occupied),
                FoodSpawner::place(&mut b, 20, &occupied)
            );
        }
    }
}

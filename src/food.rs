use rand::Rng;

use crate::board::Board;
use crate::snake::{Position, Snake};

/// Picks a uniformly random empty cell for food.
///
/// Returns `None` when the snake covers every cell, which the controller
/// treats as a win.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, cell_num: u16) -> Option<Position> {
    let candidates = Board::project(snake, cell_num, None).empty_cells();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::place_food;
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::horizontal(3);

        for _ in 0..100 {
            let food = place_food(&mut rng, &snake, 6).expect("board has free cells");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(6));
        }
    }

    #[test]
    fn every_free_cell_is_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::horizontal(2);

        let seen: HashSet<Position> = (0..200)
            .filter_map(|_| place_food(&mut rng, &snake, 2))
            .collect();

        assert_eq!(
            seen,
            HashSet::from([Position::new(0, 1), Position::new(1, 1)])
        );
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ])
        .expect("segments are non-empty");

        assert_eq!(place_food(&mut rng, &snake, 2), None);
    }
}

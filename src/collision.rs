//! Terminal-condition predicates. They only report; the controller decides
//! whether a hit ends the game.

use crate::snake::Snake;

/// Returns true if any segment lies outside the `cell_num`×`cell_num` grid.
#[must_use]
pub fn is_out(snake: &Snake, cell_num: u16) -> bool {
    snake
        .segments()
        .any(|segment| !segment.is_within_bounds(cell_num))
}

/// Returns true if two segments at different indices share a position.
///
/// Pairwise over the whole body; boards are small enough that no index is kept.
#[must_use]
pub fn is_colliding(snake: &Snake) -> bool {
    snake
        .segments()
        .enumerate()
        .any(|(i, a)| snake.segments().skip(i + 1).any(|b| a == b))
}

#[cfg(test)]
mod tests {
    use crate::snake::{Position, Snake};

    use super::{is_colliding, is_out};

    fn snake(points: &[(i32, i32)]) -> Snake {
        Snake::from_segments(points.iter().map(|&(x, y)| Position::new(x, y)).collect())
            .expect("test snakes are non-empty")
    }

    #[test]
    fn in_range_snake_is_not_out() {
        assert!(!is_out(&snake(&[(0, 0), (1, 0), (2, 0)]), 3));
    }

    #[test]
    fn any_coordinate_outside_is_out() {
        assert!(is_out(&snake(&[(0, 0), (-1, 0)]), 3));
        assert!(is_out(&snake(&[(2, 2), (2, 3)]), 3));
        assert!(is_out(&snake(&[(3, 0), (2, 0)]), 3));
        assert!(is_out(&snake(&[(0, -1)]), 3));
    }

    #[test]
    fn unique_segments_do_not_collide() {
        assert!(!is_colliding(&snake(&[(0, 0)])));
        assert!(!is_colliding(&snake(&[(0, 0), (1, 0), (1, 1), (0, 1)])));
    }

    #[test]
    fn shared_position_collides_regardless_of_index() {
        assert!(is_colliding(&snake(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)])));
        assert!(is_colliding(&snake(&[(2, 2), (2, 2)])));
        assert!(is_colliding(&snake(&[(0, 0), (1, 1), (2, 2), (1, 1), (3, 3)])));
    }
}

use std::collections::VecDeque;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside a `cell_num`×`cell_num` grid.
    #[must_use]
    pub fn is_within_bounds(self, cell_num: u16) -> bool {
        let side = i32::from(cell_num);
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns this position wrapped into the grid on both axes.
    #[must_use]
    pub fn wrapped(self, cell_num: u16) -> Self {
        let side = i32::from(cell_num);
        Self {
            x: self.x.rem_euclid(side),
            y: self.y.rem_euclid(side),
        }
    }

    /// Returns the neighbouring position one step in `direction`, unbounded.
    #[must_use]
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// What the movement engine does with a head that leaves the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EdgePolicy {
    /// The board is toroidal: leaving one edge re-enters the opposite edge.
    Wrap,
    /// The head leaves the grid; the out-of-range coordinate is kept for
    /// [`crate::collision::is_out`] to flag.
    Escape,
}

impl EdgePolicy {
    /// Picks the policy matching the boundary-checking setting.
    #[must_use]
    pub fn for_boundary_check(check_is_out: bool) -> Self {
        if check_is_out { Self::Escape } else { Self::Wrap }
    }
}

/// Ordered snake body. The front of the deque is the tail, the back is the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake from segments ordered tail to head.
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Creates a horizontal snake on row 0 from `(0, 0)` to `(length - 1, 0)`,
    /// head on the right. A zero length still yields one segment.
    #[must_use]
    pub fn horizontal(length: u16) -> Self {
        let body = (0..i32::from(length.max(1)))
            .map(|x| Position::new(x, 0))
            .collect();
        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the head position one step in `direction` under `policy`.
    #[must_use]
    pub fn next_head(&self, direction: Direction, cell_num: u16, policy: EdgePolicy) -> Position {
        let candidate = self.head().moved(direction);
        match policy {
            EdgePolicy::Wrap => candidate.wrapped(cell_num),
            EdgePolicy::Escape => candidate,
        }
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}

/// Advances `snake` one cell in `direction` and returns the resulting body.
///
/// The new head is appended; the old tail is dropped unless `grow` is set, in
/// which case the snake is one segment longer. Nothing here decides whether
/// the result is fatal.
#[must_use]
pub fn step(
    snake: &Snake,
    direction: Direction,
    cell_num: u16,
    policy: EdgePolicy,
    grow: bool,
) -> Snake {
    let mut next = snake.clone();
    let head = snake.next_head(direction, cell_num, policy);

    next.body.push_back(head);
    if !grow {
        let _ = next.body.pop_front();
    }

    next
}

use crate::snake::{Position, Snake};

/// Occupancy of one board cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Food,
    SnakeSegment,
    SnakeHead,
}

/// Square occupancy matrix derived from a snake and an optional food cell.
///
/// A `Board` is a snapshot; it is rebuilt from game state whenever it is
/// needed and never written back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    cell_num: u16,
    cells: Vec<CellKind>,
}

impl Board {
    /// Projects `snake` and `food` onto a `cell_num`×`cell_num` matrix.
    ///
    /// The head (last segment) is marked [`CellKind::SnakeHead`], every other
    /// segment [`CellKind::SnakeSegment`]. Food is written last, so if it ever
    /// shares a cell with the snake the cell reads as [`CellKind::Food`].
    /// Segments outside the grid are skipped.
    #[must_use]
    pub fn project(snake: &Snake, cell_num: u16, food: Option<Position>) -> Self {
        let mut board = Self {
            cell_num,
            cells: vec![CellKind::Empty; usize::from(cell_num) * usize::from(cell_num)],
        };

        let head_index = snake.len() - 1;
        for (index, segment) in snake.segments().enumerate() {
            let kind = if index == head_index {
                CellKind::SnakeHead
            } else {
                CellKind::SnakeSegment
            };
            board.set(*segment, kind);
        }

        if let Some(food) = food {
            board.set(food, CellKind::Food);
        }

        board
    }

    /// Side length in cells.
    #[must_use]
    pub fn cell_num(&self) -> u16 {
        self.cell_num
    }

    /// Returns the kind at `position`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<CellKind> {
        self.index_of(position).map(|index| self.cells[index])
    }

    /// Iterates over rows from top (`y == 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(usize::from(self.cell_num).max(1))
    }

    /// Collects every empty cell in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.rows()
            .zip(0..)
            .flat_map(|(row, y)| {
                row.iter()
                    .zip(0..)
                    .filter(|(kind, _)| **kind == CellKind::Empty)
                    .map(move |(_, x)| Position::new(x, y))
            })
            .collect()
    }

    fn set(&mut self, position: Position, kind: CellKind) {
        if let Some(index) = self.index_of(position) {
            self.cells[index] = kind;
        }
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.cell_num) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.cell_num) + x)
    }
}

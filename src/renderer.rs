use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::board::{Board, CellKind};
use crate::config::{GLYPH_EMPTY, GLYPH_FILLED, PALETTE, PIXELS_PER_COLUMN};
use crate::game::GameStatus;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_end_menu, render_pause_menu};

/// Terminal columns used for one cell of `cell_size` pixels.
#[must_use]
pub fn cell_columns(cell_size: u32) -> u16 {
    let columns = (cell_size / PIXELS_PER_COLUMN).max(1);
    u16::try_from(columns).unwrap_or(u16::MAX)
}

/// Renders one full frame: HUD, bordered board, and the pause or end popup.
pub fn render(frame: &mut Frame<'_>, board: &Board, cell_size: u32, hud_info: &HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, hud_info);

    let columns = cell_columns(cell_size);
    let board_area = centered_board_area(play_area, board.cell_num(), columns);

    let block = Block::bordered().border_style(Style::new().fg(PALETTE.border));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_cells(frame, inner, board, columns);

    match hud_info.status {
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::Ended(reason) => render_end_menu(frame, play_area, reason, hud_info.length),
        GameStatus::Running => {}
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, board: &Board, columns: u16) {
    let filled = GLYPH_FILLED.repeat(usize::from(columns));
    let empty = format!("{GLYPH_EMPTY:<width$}", width = usize::from(columns));

    let buffer = frame.buffer_mut();
    for (row, y) in board.rows().zip(0u16..) {
        for (kind, x) in row.iter().zip(0u16..) {
            let Some((term_x, term_y)) = cell_origin(inner, x, y, columns) else {
                continue;
            };

            let (glyph, style) = match kind {
                CellKind::Empty => (empty.as_str(), Style::new().fg(PALETTE.empty)),
                CellKind::Food => (filled.as_str(), Style::new().fg(PALETTE.food)),
                CellKind::SnakeSegment => (filled.as_str(), Style::new().fg(PALETTE.snake_segment)),
                CellKind::SnakeHead => (
                    filled.as_str(),
                    Style::new()
                        .fg(PALETTE.snake_head)
                        .add_modifier(Modifier::BOLD),
                ),
            };

            let max_width = usize::from(inner.right().saturating_sub(term_x));
            buffer.set_stringn(term_x, term_y, glyph, max_width, style);
        }
    }
}

fn cell_origin(inner: Rect, x: u16, y: u16, columns: u16) -> Option<(u16, u16)> {
    let term_x = inner.x.checked_add(x.checked_mul(columns)?)?;
    let term_y = inner.y.checked_add(y)?;
    if term_x >= inner.right() || term_y >= inner.bottom() {
        return None;
    }

    Some((term_x, term_y))
}

/// Centers the bordered board inside `area`, clipping when it does not fit.
fn centered_board_area(area: Rect, cell_num: u16, columns: u16) -> Rect {
    let width = cell_num
        .saturating_mul(columns)
        .saturating_add(2)
        .min(area.width);
    let height = cell_num.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use crate::board::Board;
    use crate::config::{GLYPH_EMPTY, GLYPH_FILLED};
    use crate::game::{Game, GameRules};
    use crate::snake::{Position, Snake};
    use crate::ui::hud::HudInfo;

    use super::{cell_columns, render};

    fn find_symbol(buffer: &Buffer, symbol: &str) -> usize {
        let area = buffer.area;
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.cell((x, y)).is_some_and(|cell| cell.symbol() == symbol))
            .count()
    }

    #[test]
    fn cell_size_maps_to_columns() {
        assert_eq!(cell_columns(40), 2);
        assert_eq!(cell_columns(20), 1);
        assert_eq!(cell_columns(5), 1);
        assert_eq!(cell_columns(65), 3);
    }

    #[test]
    fn board_cells_are_drawn() {
        let game = Game::new_with_seed(5, GameRules::default(), 4);
        let board = Board::project(
            &Snake::horizontal(3),
            5,
            Some(Position::new(4, 4)),
        );
        let info = HudInfo::from_game(&game, false);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("test backend");

        terminal
            .draw(|frame| render(frame, &board, 20, &info))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        assert_eq!(find_symbol(buffer, GLYPH_FILLED), 4);
        assert_eq!(find_symbol(buffer, GLYPH_EMPTY), 21);
    }

    #[test]
    fn oversized_board_is_clipped_without_panicking() {
        let game = Game::new_with_seed(50, GameRules::default(), 4);
        let info = HudInfo::from_game(&game, true);
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).expect("test backend");

        terminal
            .draw(|frame| render(frame, &game.board(), 40, &info))
            .expect("draw should succeed");
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::{Game, GameStatus};
use crate::input::Direction;

const HUD_MARGIN_X: u16 = 1;

/// Values displayed by the HUD rows and used to pick overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudInfo {
    pub status: GameStatus,
    pub length: usize,
    pub direction: Direction,
    pub cell_num: u16,
    /// Pre-formatted debug row; `None` hides it.
    pub debug_line: Option<String>,
}

impl HudInfo {
    /// Collects HUD values from the current game.
    #[must_use]
    pub fn from_game(game: &Game, show_debug: bool) -> Self {
        let state = game.state();
        let debug_line = show_debug.then(|| {
            let food = state
                .food()
                .map_or_else(|| "none".to_string(), |food| format!("({}, {})", food.x, food.y));
            let head = state.snake().head();
            format!(
                "tick {} | head ({}, {}) | food {food} | lock {}",
                state.tick_count(),
                head.x,
                head.y,
                state.direction_locked()
            )
        });

        Self {
            status: state.status(),
            length: state.snake().len(),
            direction: state.direction(),
            cell_num: game.cell_num(),
            debug_line,
        }
    }
}

/// Renders the status rows and returns the remaining play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: &HudInfo) -> Rect {
    let debug_height = u16::from(info.debug_line.is_some());
    let [play_area, status_area, debug_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(debug_height),
    ])
    .areas(area);

    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Min(0)]).areas(status_area);

    frame.render_widget(Paragraph::new(status_line(info)), left);
    frame.render_widget(
        Paragraph::new(Line::from("arrows move  p pause  r restart  q quit"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(PALETTE.muted)),
        right,
    );

    if let Some(debug_line) = &info.debug_line {
        frame.render_widget(
            Paragraph::new(Line::from(debug_line.as_str()))
                .style(Style::default().fg(PALETTE.muted)),
            inset_horizontal(debug_area, HUD_MARGIN_X),
        );
    }

    play_area
}

fn status_line(info: &HudInfo) -> Line<'static> {
    let label = Style::default().fg(PALETTE.muted);
    let value = Style::default()
        .fg(PALETTE.text)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Length ", label),
        Span::styled(info.length.to_string(), value),
        Span::styled("  Board ", label),
        Span::styled(format!("{0}x{0}", info.cell_num), value),
        Span::styled("  Heading ", label),
        Span::styled(info.direction.label(), value),
        Span::styled("  ", label),
        Span::styled(status_label(info.status), value),
    ])
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Running => "running",
        GameStatus::Paused => "paused",
        GameStatus::Ended(_) => "over",
    }
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

use ratatui::style::Color;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "grid-snake";

/// File holding the persisted settings object. This is the single storage key.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default log file name under the platform data directory.
pub const LOG_FILE_NAME: &str = "grid-snake.log";

/// Default drawn size of one cell, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 40;

/// Default board side length in cells.
pub const DEFAULT_CELL_NUM: u16 = 15;

/// Smallest playable board side.
pub const MIN_CELL_NUM: u16 = 2;

/// Largest board side accepted from settings.
pub const MAX_CELL_NUM: u16 = 255;

/// Default tick interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 150;

/// Segment count of a freshly started snake.
pub const INITIAL_SNAKE_LENGTH: u16 = 5;

/// Pixel width represented by one terminal column.
pub const PIXELS_PER_COLUMN: u32 = 20;

/// Input poll timeout per loop iteration.
pub const FRAME_POLL_MS: u64 = 16;

/// Glyph drawn for occupied cells, repeated across the cell width.
pub const GLYPH_FILLED: &str = "█";

/// Glyph drawn for empty cells.
pub const GLYPH_EMPTY: &str = "·";

/// Colors applied to board cells and overlay text.
#[derive(Debug)]
pub struct Palette {
    pub snake_segment: Color,
    pub snake_head: Color,
    pub food: Color,
    pub empty: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
}

pub const PALETTE: Palette = Palette {
    snake_segment: Color::Green,
    snake_head: Color::LightGreen,
    food: Color::Red,
    empty: Color::DarkGray,
    border: Color::Gray,
    text: Color::Blue,
    muted: Color::DarkGray,
};

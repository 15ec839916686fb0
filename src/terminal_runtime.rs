//! Raw-mode terminal ownership for one play session.

use std::io::{self, Stdout, stdout};
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

static PANIC_HOOK: Once = Once::new();

/// Alternate-screen session the game draws into.
///
/// Entering takes over the terminal and arranges for it to be handed back on
/// drop and on panic.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let _ = leave_screen();
                previous(info);
            }));
        });

        enable_raw_mode()?;
        let terminal = execute!(stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout())));

        match terminal {
            Ok(terminal) => {
                debug!("terminal session started");
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = leave_screen();
                Err(error)
            }
        }
    }

    /// Draws one frame.
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        match leave_screen() {
            Ok(()) => debug!("terminal session ended"),
            Err(error) => warn!("failed to restore terminal: {error}"),
        }
    }
}

fn leave_screen() -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    raw_mode
}

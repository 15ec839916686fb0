use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use grid_snake::config::{
    APP_DIR_NAME, FRAME_POLL_MS, LOG_FILE_NAME, MAX_CELL_NUM, MIN_CELL_NUM,
};
use grid_snake::game::{DirectionOutcome, Game};
use grid_snake::input::{GameInput, poll_input};
use grid_snake::renderer;
use grid_snake::schedule::TickSchedule;
use grid_snake::settings::{
    Settings, SettingsError, load_settings, reset_settings, save_settings, settings_path,
};
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::ui::hud::HudInfo;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board side length in cells.
    #[arg(
        long,
        value_parser = clap::value_parser!(u16)
            .range(i64::from(MIN_CELL_NUM)..=i64::from(MAX_CELL_NUM))
    )]
    cell_num: Option<u16>,

    /// Drawn cell size in pixels; every 20 pixels is one terminal column.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    cell_size: Option<u32>,

    /// Milliseconds between scheduled ticks.
    #[arg(long = "interval-ms", value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,

    /// End the game when the snake leaves the board instead of wrapping.
    #[arg(long, value_name = "BOOL")]
    check_out: Option<bool>,

    /// End the game when the snake runs into itself.
    #[arg(long, value_name = "BOOL")]
    check_colliding: Option<bool>,

    /// Step only on direction input instead of on a timer.
    #[arg(long, value_name = "BOOL")]
    disable_timer: Option<bool>,

    /// Show the debug row under the board.
    #[arg(long)]
    debug: bool,

    /// Seed the food placement for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the platform default.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Persist the command-line overrides.
    #[arg(long)]
    save: bool,

    /// Restore default settings on disk before starting.
    #[arg(long)]
    reset_settings: bool,

    /// Log verbosity written to the log file.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log file to write instead of the platform default.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings_file = cli.settings.clone().unwrap_or_else(settings_path);
    let settings = match bootstrap_settings(&cli, &settings_file) {
        Ok(settings) => settings,
        Err(error) => {
            error!("settings rejected: {error}");
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };

    if let Err(error) = play(&settings, cli.seed) {
        error!("game loop failed: {error}");
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return;
    }

    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Logging disabled, cannot create {}: {error}", path.display());
            return;
        }
    };

    if let Err(error) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("Logging disabled: {error}");
    }
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Loads, repairs and writes back the stored settings, then applies CLI overrides.
fn bootstrap_settings(cli: &Cli, path: &Path) -> Result<Settings, SettingsError> {
    let stored = if cli.reset_settings {
        info!("resetting settings at {}", path.display());
        reset_settings(path)?
    } else {
        let stored = load_settings(path).settings;
        if let Err(error) = save_settings(path, &stored) {
            error!("failed to write back settings: {error}");
        }
        stored
    };

    let settings = apply_overrides(stored, cli);
    if cli.save {
        settings.validate()?;
        save_settings(path, &settings)?;
        info!("saved settings to {}", path.display());
    }

    Ok(settings)
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(cell_num) = cli.cell_num {
        settings.cell_num = cell_num;
    }
    if let Some(cell_size) = cli.cell_size {
        settings.cell_size = cell_size;
    }
    if let Some(interval_ms) = cli.interval_ms {
        settings.interval_milliseconds = interval_ms;
    }
    if let Some(check_out) = cli.check_out {
        settings.check_is_out = check_out;
    }
    if let Some(check_colliding) = cli.check_colliding {
        settings.check_is_colliding = check_colliding;
    }
    if let Some(disable_timer) = cli.disable_timer {
        settings.disable_timer = disable_timer;
    }
    settings.show_debug |= cli.debug;
    settings
}

fn play(settings: &Settings, seed: Option<u64>) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut game = Game::from_settings(settings, seed);
    let mut schedule = TickSchedule::new(Duration::from_millis(settings.interval_milliseconds));
    let disable_timer = game.rules().disable_timer;
    schedule.sync(game.status(), disable_timer, Instant::now(), false);

    loop {
        let board = game.board();
        let hud_info = HudInfo::from_game(&game, settings.show_debug);
        session.draw(|frame| renderer::render(frame, &board, settings.cell_size, &hud_info))?;

        let mut stepped = false;
        if let Some(game_input) = poll_input(Duration::from_millis(FRAME_POLL_MS))? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause => {
                    let status = game.toggle_pause();
                    info!("pause toggled, now {status:?}");
                }
                GameInput::Restart => {
                    game.reset();
                    stepped = true;
                }
                GameInput::Direction(direction) => {
                    stepped = matches!(
                        game.request_direction(direction),
                        DirectionOutcome::Stepped(_)
                    );
                }
            }
        }

        let now = Instant::now();
        if schedule.is_due(now) {
            game.tick();
            stepped = true;
        }

        schedule.sync(game.status(), disable_timer, now, stepped);
    }

    Ok(())
}

//! Grid snake: a pure simulation core plus a terminal front-end.
//!
//! The core (`board`, `food`, `snake`, `collision`, `game`) never touches the
//! terminal or the filesystem. `settings`, `renderer`, `ui` and
//! `terminal_runtime` are the collaborators the binary wires around it.

pub mod board;
pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

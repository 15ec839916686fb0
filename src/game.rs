use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::collision::{is_colliding, is_out};
use crate::config::INITIAL_SNAKE_LENGTH;
use crate::food::place_food;
use crate::input::{Direction, direction_change_is_valid};
use crate::settings::Settings;
use crate::snake::{EdgePolicy, Position, Snake, step};

/// Why a game stopped. Reaching one of these is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    OutOfBounds,
    Collision,
    Won,
}

impl EndReason {
    /// Message shown to the player.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::OutOfBounds => "Snake is out of board. You lost",
            Self::Collision => "Snake collision. You lost",
            Self::Won => "You won!",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OutOfBounds => "out of bounds",
            Self::Collision => "collision",
            Self::Won => "won",
        };
        f.write_str(label)
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Ended(EndReason),
}

impl GameStatus {
    #[must_use]
    pub fn is_ended(self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

/// Switches that decide which detector results are fatal and how input is paced.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct GameRules {
    /// Leaving the board ends the game; when off, the board wraps around.
    pub check_is_out: bool,
    /// Running into the body ends the game.
    pub check_is_colliding: bool,
    /// No scheduled ticks; every accepted direction input steps the game.
    pub disable_timer: bool,
}

impl From<&Settings> for GameRules {
    fn from(settings: &Settings) -> Self {
        Self {
            check_is_out: settings.check_is_out,
            check_is_colliding: settings.check_is_colliding,
            disable_timer: settings.disable_timer,
        }
    }
}

impl GameRules {
    #[must_use]
    pub fn edge_policy(self) -> EdgePolicy {
        EdgePolicy::for_boundary_check(self.check_is_out)
    }
}

/// Snapshot of one session. Only [`Game`] mutates it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    snake: Snake,
    food: Option<Position>,
    direction: Direction,
    status: GameStatus,
    direction_locked: bool,
    tick_count: u64,
}

impl GameState {
    /// Builds the starting state: a horizontal snake from `(0, 0)` facing
    /// right, truncated to the board width, and one food cell.
    #[must_use]
    pub fn initial<R: Rng + ?Sized>(cell_num: u16, rng: &mut R) -> Self {
        let snake = Snake::horizontal(INITIAL_SNAKE_LENGTH.min(cell_num));
        let food = place_food(rng, &snake, cell_num);
        let mut state = Self::with_snake(snake, Direction::Right, food);

        if food.is_none() {
            state.status = GameStatus::Ended(EndReason::Won);
        }

        state
    }

    /// Builds a running, unlocked state from explicit parts.
    #[must_use]
    pub fn with_snake(snake: Snake, direction: Direction, food: Option<Position>) -> Self {
        Self {
            snake,
            food,
            direction,
            status: GameStatus::Running,
            direction_locked: false,
            tick_count: 0,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    /// True while a direction change waits for the next tick to commit.
    #[must_use]
    pub fn direction_locked(&self) -> bool {
        self.direction_locked
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Result of a direction request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DirectionOutcome {
    /// Rejected: not running, a change is already pending, or a reversal.
    Ignored,
    /// Direction updated; takes effect on the next tick.
    Turned,
    /// A synchronous tick ran; carries the status after it.
    Stepped(GameStatus),
}

/// Game loop controller. Owns the state and the food RNG.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    rules: GameRules,
    cell_num: u16,
    rng: StdRng,
}

impl Game {
    /// Starts a game seeded from OS entropy.
    #[must_use]
    pub fn new(cell_num: u16, rules: GameRules) -> Self {
        Self::from_rng(cell_num, rules, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(cell_num: u16, rules: GameRules, seed: u64) -> Self {
        Self::from_rng(cell_num, rules, StdRng::seed_from_u64(seed))
    }

    /// Starts a game from persisted settings, seeded when `seed` is given.
    #[must_use]
    pub fn from_settings(settings: &Settings, seed: Option<u64>) -> Self {
        let rules = GameRules::from(settings);
        match seed {
            Some(seed) => Self::new_with_seed(settings.cell_num, rules, seed),
            None => Self::new(settings.cell_num, rules),
        }
    }

    /// Resumes from an explicit state, e.g. a scripted scenario.
    #[must_use]
    pub fn with_state(cell_num: u16, rules: GameRules, state: GameState, seed: u64) -> Self {
        Self {
            state,
            rules,
            cell_num,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn from_rng(cell_num: u16, rules: GameRules, mut rng: StdRng) -> Self {
        let state = GameState::initial(cell_num, &mut rng);
        info!(
            "new game on {cell_num}x{cell_num} board (check out: {}, check colliding: {}, timer disabled: {})",
            rules.check_is_out, rules.check_is_colliding, rules.disable_timer
        );

        Self {
            state,
            rules,
            cell_num,
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> GameRules {
        self.rules
    }

    #[must_use]
    pub fn cell_num(&self) -> u16 {
        self.cell_num
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Projects the current snake and food for rendering.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::project(&self.state.snake, self.cell_num, self.state.food)
    }

    /// Advances the simulation by one step. A no-op unless running.
    ///
    /// Order within a tick: eat check against the next head, move, re-place
    /// food (no free cell wins), boundary check, collision check, commit.
    pub fn tick(&mut self) -> GameStatus {
        if self.state.status != GameStatus::Running {
            return self.state.status;
        }

        self.state.tick_count += 1;

        let direction = self.state.direction;
        let policy = self.rules.edge_policy();
        let next_head = self.state.snake.next_head(direction, self.cell_num, policy);
        let ate = self.state.food == Some(next_head);
        let snake = step(&self.state.snake, direction, self.cell_num, policy, ate);

        let food = if ate {
            match place_food(&mut self.rng, &snake, self.cell_num) {
                Some(food) => Some(food),
                None => {
                    self.state.snake = snake;
                    self.state.food = None;
                    return self.end(EndReason::Won);
                }
            }
        } else {
            self.state.food
        };

        if self.rules.check_is_out && is_out(&snake, self.cell_num) {
            return self.end(EndReason::OutOfBounds);
        }

        if self.rules.check_is_colliding && is_colliding(&snake) {
            return self.end(EndReason::Collision);
        }

        if ate {
            debug!("snake grew to {} segments", snake.len());
        }

        self.state.snake = snake;
        self.state.food = food;
        self.state.direction_locked = false;
        self.state.status
    }

    /// Stops ticking. Returns true when the game was running.
    pub fn pause(&mut self) -> bool {
        if self.state.status != GameStatus::Running {
            return false;
        }

        self.state.status = GameStatus::Paused;
        true
    }

    /// Continues a paused game. Returns true when the game was paused.
    pub fn resume(&mut self) -> bool {
        if self.state.status != GameStatus::Paused {
            return false;
        }

        self.state.status = GameStatus::Running;
        true
    }

    /// Flips between running and paused; ended games stay ended.
    pub fn toggle_pause(&mut self) -> GameStatus {
        if !self.pause() {
            let _ = self.resume();
        }
        self.state.status
    }

    /// Applies one direction input.
    ///
    /// At most one change is accepted between ticks, and never a reversal.
    /// Asking for the current direction steps the game immediately, as does
    /// every accepted change when the timer is disabled.
    pub fn request_direction(&mut self, direction: Direction) -> DirectionOutcome {
        if self.state.status != GameStatus::Running || self.state.direction_locked {
            return DirectionOutcome::Ignored;
        }

        let current = self.state.direction;
        if !direction_change_is_valid(current, direction) {
            return DirectionOutcome::Ignored;
        }

        if direction == current {
            return DirectionOutcome::Stepped(self.tick());
        }

        self.state.direction = direction;
        self.state.direction_locked = true;

        if self.rules.disable_timer {
            return DirectionOutcome::Stepped(self.tick());
        }

        DirectionOutcome::Turned
    }

    /// Discards the current session and starts over with the same rules.
    pub fn reset(&mut self) {
        self.state = GameState::initial(self.cell_num, &mut self.rng);
        info!("game reset");
    }

    fn end(&mut self, reason: EndReason) -> GameStatus {
        self.state.status = GameStatus::Ended(reason);
        info!(
            "game ended ({reason}) after {} ticks with {} segments",
            self.state.tick_count,
            self.state.snake.len()
        );
        self.state.status
    }
}

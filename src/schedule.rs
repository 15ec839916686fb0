use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// Recurring tick deadline owned by the runtime loop.
///
/// Cancelling drops the pending deadline; arming sets it one interval from
/// `now`. The game itself never looks at the clock.
#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickSchedule {
    /// Creates a cancelled schedule.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the next tick one interval after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when armed and the deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Follows the game after each loop pass.
    ///
    /// Cancelled unless the game is running on a timer. When `stepped` is set
    /// a tick just ran, so the deadline moves a full interval past `now`.
    pub fn sync(&mut self, status: GameStatus, disable_timer: bool, now: Instant, stepped: bool) {
        if disable_timer || status != GameStatus::Running {
            self.cancel();
            return;
        }

        if stepped || !self.is_armed() {
            self.arm(now);
        }
    }
}

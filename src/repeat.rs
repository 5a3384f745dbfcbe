//! # Repeat-Action Controller
//!
//! Turns a sustained press on a step control into a stream of firings: one
//! immediately, the next after [`INITIAL_DELAY`], then every
//! [`REPEAT_INTERVAL`] until the press ends or the pointer leaves the control.
//! Re-entering the control while still pressed fires at once and resumes the
//! fast cadence.
//!
//! The controller is driven by explicit timestamps; the owner calls
//! [`RepeatAction::poll`] from its timer tick and performs one action per
//! reported firing.

use std::time::{Duration, Instant};

pub const INITIAL_DELAY: Duration = Duration::from_millis(250);
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(50);
/// Shortest accepted repeat interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatAction {
    initial_delay: Duration,
    interval: Duration,
    pressed: bool,
    inside: bool,
    next_fire: Option<Instant>,
}

impl Default for RepeatAction {
    fn default() -> Self {
        Self::new(INITIAL_DELAY, REPEAT_INTERVAL)
    }
}

impl RepeatAction {
    /// `interval` is raised to [`MIN_INTERVAL`] if shorter.
    pub fn new(initial_delay: Duration, interval: Duration) -> Self {
        Self {
            initial_delay,
            interval: interval.max(MIN_INTERVAL),
            pressed: false,
            inside: true,
            next_fire: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether a firing is scheduled.
    pub fn is_armed(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Begin a press. Returns `true`: the action fires immediately.
    pub fn press_start(&mut self, now: Instant) -> bool {
        self.pressed = true;
        self.inside = true;
        self.next_fire = Some(now + self.initial_delay);
        true
    }

    pub fn press_end(&mut self) {
        self.pressed = false;
        self.next_fire = None;
    }

    pub fn pointer_leave(&mut self) {
        self.inside = false;
        self.next_fire = None;
    }

    /// Pointer came back over the control. Fires at once if still pressed.
    pub fn pointer_enter(&mut self, now: Instant) -> bool {
        self.inside = true;
        if !self.pressed {
            return false;
        }
        self.next_fire = Some(now + self.interval);
        true
    }

    /// Number of firings due at `now`, rescheduling the next one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(at) = self.next_fire else {
            return 0;
        };
        if at > now || !self.pressed || !self.inside {
            return 0;
        }

        let late = now.duration_since(at).as_nanos() / self.interval.as_nanos();
        let fired = u32::try_from(late.saturating_add(1)).unwrap_or(u32::MAX);
        let late = u32::try_from(late).unwrap_or(u32::MAX);
        self.next_fire = Some(at + self.interval.saturating_mul(late) + self.interval);
        fired
    }

    /// Time of the next scheduled firing.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_fire
    }
}

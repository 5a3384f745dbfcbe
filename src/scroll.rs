//! # Scroll Animator
//!
//! Owns the menu's scroll position and moves it toward a target one paint
//! opportunity at a time.
//!
//! ```text
//!            request(target)              tick() reaches target
//!   Idle ───────────────────▶ Animating ───────────────────────▶ Idle
//!                               │  ▲
//!                               └──┘ request(new target) cancels and restarts
//! ```
//!
//! There is never more than one pending animation: every request cancels the
//! previous one before arming a new frame, so two targets can't both write the
//! position.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Distance below which the halving easing lands on its target.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Upper bound on frames spent by the halving easing.
pub const MAX_HALVING_FRAMES: u32 = 64;

/// Default duration of the quartic easing.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// How the position converges on its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Move half the remaining distance every frame.
    Halve { epsilon: f64 },
    /// Quartic ease-out over a fixed duration.
    QuarticOut { duration: Duration },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Halve {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Easing family selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingKind {
    #[default]
    Halve,
    Quartic,
}

impl EasingKind {
    pub fn with_duration(self, duration: Duration) -> Easing {
        match self {
            EasingKind::Halve => Easing::default(),
            EasingKind::Quartic => Easing::QuarticOut { duration },
        }
    }
}

/// `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Jump to the target on the next frame.
    Snap,
    /// Animate with the configured easing.
    Eased,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    mode: ScrollMode,
    start: f64,
    target: f64,
    /// Set on the first frame, so the request time doesn't count as elapsed.
    started_at: Option<Instant>,
    frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Animating,
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    position: f64,
    easing: Easing,
    pending: Option<Animation>,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl ScrollAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            position: 0.0,
            easing,
            pending: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn state(&self) -> AnimatorState {
        if self.pending.is_some() {
            AnimatorState::Animating
        } else {
            AnimatorState::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Resting position of the pending animation, if any.
    pub fn target(&self) -> Option<f64> {
        self.pending.map(|a| a.target)
    }

    /// Drop the pending frame, leaving the position where it is.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!(position = self.position, "scroll animation cancelled");
        }
    }

    /// Cancel any pending animation and schedule a move to `target`.
    pub fn request(&mut self, target: f64, mode: ScrollMode) {
        self.cancel();
        self.pending = Some(Animation {
            mode,
            start: self.position,
            target,
            started_at: None,
            frames: 0,
        });
    }

    /// Advance one paint opportunity. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut animation) = self.pending.take() else {
            return false;
        };

        let finished = match (animation.mode, self.easing) {
            (ScrollMode::Snap, _) => {
                self.position = animation.target;
                true
            }
            (ScrollMode::Eased, Easing::Halve { epsilon }) => {
                animation.frames += 1;
                let next = self.position + (animation.target - self.position) / 2.0;
                if (animation.target - next).abs() < epsilon
                    || animation.frames >= MAX_HALVING_FRAMES
                {
                    self.position = animation.target;
                    true
                } else {
                    self.position = next;
                    false
                }
            }
            (ScrollMode::Eased, Easing::QuarticOut { duration }) => {
                animation.frames += 1;
                let started_at = *animation.started_at.get_or_insert(now);
                let elapsed = now.saturating_duration_since(started_at);
                if duration.is_zero() || elapsed >= duration {
                    self.position = animation.target;
                    true
                } else {
                    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                    self.position =
                        animation.start + (animation.target - animation.start) * ease_out_quart(t);
                    false
                }
            }
        };

        if !finished {
            self.pending = Some(animation);
        }
        !finished
    }

    /// Set the position immediately, dropping any pending animation.
    pub fn jump_to(&mut self, position: f64) {
        self.cancel();
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(animator: &mut ScrollAnimator, start: Instant, step: Duration) -> u32 {
        let mut frames = 0;
        let mut now = start;
        while animator.tick(now) {
            frames += 1;
            now += step;
            assert!(frames < 1_000, "animation never settled");
        }
        frames
    }

    #[test]
    fn test_snap_applies_on_next_frame() {
        let mut animator = ScrollAnimator::default();
        animator.request(12.0, ScrollMode::Snap);
        assert_eq!(animator.position(), 0.0);
        assert_eq!(animator.state(), AnimatorState::Animating);

        assert!(!animator.tick(Instant::now()));
        assert_eq!(animator.position(), 12.0);
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn test_halving_moves_half_way_each_frame() {
        let mut animator = ScrollAnimator::default();
        animator.request(8.0, ScrollMode::Eased);
        let now = Instant::now();
        animator.tick(now);
        assert_eq!(animator.position(), 4.0);
        animator.tick(now);
        assert_eq!(animator.position(), 6.0);
    }

    #[test]
    fn test_halving_terminates_exactly_on_target() {
        let mut animator = ScrollAnimator::default();
        animator.request(1_000.0, ScrollMode::Eased);
        let frames = run_to_rest(&mut animator, Instant::now(), Duration::from_millis(16));
        assert!(frames <= MAX_HALVING_FRAMES);
        assert_eq!(animator.position(), 1_000.0);
    }

    #[test]
    fn test_quartic_respects_duration() {
        let duration = Duration::from_millis(100);
        let mut animator = ScrollAnimator::new(Easing::QuarticOut { duration });
        animator.request(10.0, ScrollMode::Eased);

        let start = Instant::now();
        assert!(animator.tick(start));
        assert_eq!(animator.position(), 0.0);

        assert!(animator.tick(start + Duration::from_millis(50)));
        let halfway = animator.position();
        assert!((halfway - 10.0 * ease_out_quart(0.5)).abs() < 1e-9);

        assert!(!animator.tick(start + duration));
        assert_eq!(animator.position(), 10.0);
    }

    #[test]
    fn test_new_request_replaces_pending_animation() {
        let mut animator = ScrollAnimator::default();
        let now = Instant::now();
        animator.request(100.0, ScrollMode::Eased);
        animator.tick(now);
        animator.tick(now);

        animator.request(-20.0, ScrollMode::Eased);
        assert_eq!(animator.target(), Some(-20.0));
        run_to_rest(&mut animator, now, Duration::from_millis(16));
        assert_eq!(animator.position(), -20.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_cancel_freezes_position() {
        let mut animator = ScrollAnimator::default();
        animator.request(10.0, ScrollMode::Eased);
        animator.tick(Instant::now());
        animator.cancel();
        assert_eq!(animator.position(), 5.0);
        assert!(!animator.tick(Instant::now()));
        assert_eq!(animator.position(), 5.0);
    }

    #[test]
    fn test_ease_out_quart_bounds() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.5);
    }
}

#![forbid(unsafe_code)]

//! Fixed-duration eased interpolation between two values.
//!
//! # Invariants
//!
//! 1. `value()` equals `from` before the first tick and exactly `to` once
//!    complete; in between it follows `from + (to - from) * easing(progress)`.
//! 2. Progress is `elapsed / duration`, clamped to `[0, 1]`.
//! 3. A zero-duration tween completes on its first tick, including
//!    `tick(Duration::ZERO)`.
//!
//! # Failure Modes
//!
//! - Non-finite endpoints propagate into `value()`; callers validate inputs.

use std::time::Duration;

use super::Animation;
use super::easing::{EasingFn, standard};

/// Eased interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
    ticked: bool,
}

impl Tween {
    /// Create a tween with the [`standard`] curve.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: standard,
            ticked: false,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    #[inline]
    #[must_use]
    pub fn start(&self) -> f64 {
        self.from
    }

    /// End value.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Configured duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.ticked { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.ticked = true;
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.ticked && self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = (self.easing)(self.progress());
        self.from + (self.to - self.from) * eased
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.ticked = false;
    }
}

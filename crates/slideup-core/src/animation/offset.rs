#![forbid(unsafe_code)]

//! Single-owner animated value with generation-token supersession.
//!
//! [`AnimatedOffset`] holds one numeric value and at most one driver. Every
//! write goes through it:
//!
//! - [`set_to`](AnimatedOffset::set_to) writes directly (drag moves, resets).
//! - [`animate_to`](AnimatedOffset::animate_to) installs a timing or spring
//!   driver and hands back an [`AnimationToken`].
//!
//! Either call bumps the generation, so whatever was in flight before is
//! superseded: it stops writing and its token never completes. A caller that
//! attached follow-up work to a token therefore only needs to compare tokens
//! when [`tick`](AnimatedOffset::tick) reports a [`Completion`].
//!
//! # Invariants
//!
//! 1. At most one driver writes the value per frame.
//! 2. `tick` reports a completion at most once per token, and only for the
//!    token returned by the most recent `animate_to`.
//! 3. After `set_to`, no token issued earlier is current.
//!
//! # Failure Modes
//!
//! - A superseded animation is abandoned silently; there is no error or
//!   cancellation notification. Callers that care compare tokens.

use std::time::Duration;

use super::Animation;
use super::easing::EasingFn;
use super::spring::{Spring, SpringParams};
use super::tween::Tween;

/// Identifies one `animate_to` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationToken(u64);

impl AnimationToken {
    /// Raw generation number.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// How an animation moves toward its target.
#[derive(Debug, Clone, Copy)]
pub enum Curve {
    /// Fixed duration with an easing curve.
    Timing { duration: Duration, easing: EasingFn },
    /// Physics-driven, no fixed duration.
    Spring(SpringParams),
}

impl Curve {
    /// Timing curve shorthand.
    #[must_use]
    pub fn timing(duration: Duration, easing: EasingFn) -> Self {
        Self::Timing { duration, easing }
    }

    /// Spring curve shorthand.
    #[must_use]
    pub fn spring(params: SpringParams) -> Self {
        Self::Spring(params)
    }
}

/// Which kind of driver currently owns the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Nothing is animating; the value only changes through `set_to`.
    Idle,
    Timing,
    Spring,
}

#[derive(Debug, Clone)]
enum Driver {
    Idle,
    Timing(Tween),
    Spring(Spring),
}

/// Reported by [`AnimatedOffset::tick`] when the current animation finishes
/// naturally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub token: AnimationToken,
    /// Final value, equal to the animation's target.
    pub value: f64,
}

/// An animated scalar with exactly one writer at a time.
#[derive(Debug, Clone)]
pub struct AnimatedOffset {
    value: f64,
    driver: Driver,
    generation: u64,
    current: Option<AnimationToken>,
}

impl AnimatedOffset {
    /// Create an idle offset holding `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            driver: Driver::Idle,
            generation: 0,
            current: None,
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Kind of driver currently writing the value.
    #[must_use]
    pub fn driver_kind(&self) -> DriverKind {
        match self.driver {
            Driver::Idle => DriverKind::Idle,
            Driver::Timing(_) => DriverKind::Timing,
            Driver::Spring(_) => DriverKind::Spring,
        }
    }

    /// Whether a driver is installed.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !matches!(self.driver, Driver::Idle)
    }

    /// Whether `token` belongs to the animation currently in flight.
    #[inline]
    #[must_use]
    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.current == Some(token)
    }

    fn supersede(&mut self) -> u64 {
        #[cfg(feature = "tracing")]
        if let Some(token) = self.current {
            tracing::trace!(
                target: "slideup_core",
                generation = token.generation(),
                value = self.value,
                "offset.supersede"
            );
        }
        self.generation = self.generation.wrapping_add(1);
        self.current = None;
        self.driver = Driver::Idle;
        self.generation
    }

    /// Write `value` directly, superseding any animation in flight.
    pub fn set_to(&mut self, value: f64) {
        self.supersede();
        self.value = value;
    }

    /// Animate from the current value to `target`.
    ///
    /// Supersedes whatever was in flight. The returned token completes once,
    /// on the frame the animation settles, unless it is superseded first.
    pub fn animate_to(&mut self, target: f64, curve: Curve) -> AnimationToken {
        let token = AnimationToken(self.supersede());
        self.driver = match curve {
            Curve::Timing { duration, easing } => {
                Driver::Timing(Tween::new(self.value, target, duration).easing(easing))
            }
            Curve::Spring(params) => Driver::Spring(Spring::new(self.value, target, params)),
        };
        self.current = Some(token);
        token
    }

    /// Advance the active driver by one frame.
    ///
    /// Returns the completion of the current animation on the frame it
    /// settles; `None` on every other frame, and always `None` while idle.
    pub fn tick(&mut self, dt: Duration) -> Option<Completion> {
        let (value, complete) = match &mut self.driver {
            Driver::Idle => return None,
            Driver::Timing(tween) => {
                tween.tick(dt);
                (tween.value(), tween.is_complete())
            }
            Driver::Spring(spring) => {
                spring.tick(dt);
                (spring.value(), spring.is_complete())
            }
        };
        self.value = value;
        if !complete {
            return None;
        }
        self.driver = Driver::Idle;
        self.current.take().map(|token| Completion { token, value })
    }
}

impl Default for AnimatedOffset {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::linear;

    const MS_16: Duration = Duration::from_millis(16);
    const MS_300: Duration = Duration::from_millis(300);

    fn run(offset: &mut AnimatedOffset, frames: usize) -> Vec<Completion> {
        (0..frames).filter_map(|_| offset.tick(MS_16)).collect()
    }

    #[test]
    fn idle_tick_is_noop() {
        let mut offset = AnimatedOffset::new(260.0);
        assert_eq!(offset.tick(MS_16), None);
        assert_eq!(offset.value(), 260.0);
        assert_eq!(offset.driver_kind(), DriverKind::Idle);
    }

    #[test]
    fn timing_completes_once_at_target() {
        let mut offset = AnimatedOffset::new(260.0);
        let token = offset.animate_to(0.0, Curve::timing(MS_300, linear));
        assert!(offset.is_current(token));

        let done = run(&mut offset, 40);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].token, token);
        assert_eq!(done[0].value, 0.0);
        assert_eq!(offset.value(), 0.0);
        assert!(!offset.is_animating());
        assert!(!offset.is_current(token));
    }

    #[test]
    fn spring_completes_once_at_target() {
        let mut offset = AnimatedOffset::new(90.0);
        let token = offset.animate_to(0.0, Curve::spring(SpringParams::default()));
        assert_eq!(offset.driver_kind(), DriverKind::Spring);
        let done = run(&mut offset, 400);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].token, token);
        assert_eq!(offset.value(), 0.0);
    }

    #[test]
    fn set_to_supersedes_in_flight_animation() {
        let mut offset = AnimatedOffset::new(0.0);
        let token = offset.animate_to(260.0, Curve::timing(MS_300, linear));
        offset.tick(MS_16);

        offset.set_to(42.0);
        assert!(!offset.is_current(token));
        assert!(run(&mut offset, 40).is_empty(), "superseded token must not fire");
        assert_eq!(offset.value(), 42.0);
    }

    #[test]
    fn second_animate_to_replaces_first_token() {
        let mut offset = AnimatedOffset::new(0.0);
        let first = offset.animate_to(260.0, Curve::timing(MS_300, linear));
        offset.tick(MS_16);
        let second = offset.animate_to(260.0, Curve::timing(MS_300, linear));
        assert_ne!(first, second);

        let done = run(&mut offset, 40);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].token, second);
    }

    #[test]
    fn animation_starts_from_live_value() {
        let mut offset = AnimatedOffset::new(0.0);
        offset.set_to(120.0);
        offset.animate_to(260.0, Curve::timing(MS_300, linear));
        offset.tick(Duration::from_millis(150));
        assert!((offset.value() - 190.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let mut offset = AnimatedOffset::new(0.0);
        let token = offset.animate_to(260.0, Curve::timing(Duration::ZERO, linear));
        assert_eq!(offset.value(), 0.0);
        let done = offset.tick(Duration::ZERO);
        assert_eq!(done.map(|c| c.token), Some(token));
        assert_eq!(offset.value(), 260.0);
    }
}

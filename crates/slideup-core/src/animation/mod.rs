#![forbid(unsafe_code)]

//! Animation primitives for sheet motion.
//!
//! Every driver implements [`Animation`]: it is advanced by the host frame
//! delta and exposes its current value in the units of whatever it animates
//! (pixels, for the sheet offset).
//!
//! | Type | Driver | Completion |
//! |------|--------|------------|
//! | [`Tween`] | eased interpolation over a fixed duration | elapsed ≥ duration |
//! | [`Spring`] | damped harmonic oscillator | displacement and speed under rest thresholds |
//!
//! [`AnimatedOffset`] ties them together: it is the single owner of a value
//! and decides which driver (if any) writes it on the next frame.
//!
//! # Invariants
//!
//! 1. `tick(Duration::ZERO)` never moves a value, but it does complete a
//!    zero-duration tween.
//! 2. A completed animation stays complete until `reset()`.
//! 3. `value()` is always finite for finite inputs.

use std::time::Duration;

pub mod easing;
pub mod offset;
pub mod spring;
pub mod tween;

pub use easing::{
    CubicBezier, Easing, EasingFn, ease, ease_in, ease_in_out, ease_out, in_out, linear,
    standard,
};
pub use offset::{AnimatedOffset, AnimationToken, Completion, Curve, DriverKind};
pub use spring::{Spring, SpringParams};
pub use tween::Tween;

/// A time-driven animation.
pub trait Animation {
    /// Advance by one frame delta.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current animated value.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

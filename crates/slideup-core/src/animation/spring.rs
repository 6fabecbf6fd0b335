#![forbid(unsafe_code)]

//! Damped harmonic oscillator used for snap-back motion.
//!
//! Classical damped spring with mass:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force. Higher settles faster.
//! - **damping** (c): velocity drag. Below `2√(k·m)` the spring overshoots
//!   and oscillates; above it the approach is sluggish.
//! - **mass** (m): inertia. Heavier springs move slower for the same force.
//! - **rest thresholds**: once both displacement and speed drop below these,
//!   the spring snaps exactly onto the target and reports completion.
//!
//! The defaults ([`SpringParams::default`]) come from the familiar
//! tension 40 / friction 7 pairing: stiffness 230.2, damping 22, mass 1.
//! That is slightly underdamped, so a released sheet settles with a barely
//! visible bounce.
//!
//! # Integration
//!
//! Semi-implicit Euler with a 4ms step cap. Larger frame deltas are
//! subdivided so a stalled frame cannot blow the integration up.
//!
//! # Invariants
//!
//! 1. `value()` returns the raw position; no clamping.
//! 2. A spring at rest stays at rest until `reset()`.
//! 3. Stiffness and mass are strictly positive, damping non-negative.
//! 4. One `advance` simulates at most five seconds, whatever `dt` is.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Longest span one `advance` integrates (1250 steps).
const MAX_ADVANCE_SECS: f64 = 5.0;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.01;

/// Convert Origami-style tension to stiffness.
fn stiffness_from_tension(tension: f64) -> f64 {
    (tension - 30.0) * 3.62 + 194.0
}

/// Convert Origami-style friction to damping.
fn damping_from_friction(friction: f64) -> f64 {
    (friction - 8.0) * 3.0 + 25.0
}

/// Physical parameters of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Displacement below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
    /// Stop at the target instead of overshooting it.
    pub overshoot_clamping: bool,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::from_tension_friction(40.0, 7.0)
    }
}

impl SpringParams {
    /// Build parameters from Origami tension/friction values.
    #[must_use]
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self {
            stiffness: stiffness_from_tension(tension),
            damping: damping_from_friction(friction),
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
            overshoot_clamping: false,
        }
    }

    /// Set stiffness (builder pattern). Clamped to a small positive minimum.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to `>= 0`.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set mass (builder pattern). Clamped to a small positive minimum.
    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_MASS);
        self
    }

    /// Enable or disable overshoot clamping (builder pattern).
    #[must_use]
    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Damping at which the spring neither overshoots nor lags.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

/// A damped spring moving a value toward a target.
///
/// ```
/// use std::time::Duration;
/// use slideup_core::animation::{Animation, Spring, SpringParams};
///
/// let mut spring = Spring::new(120.0, 0.0, SpringParams::default());
/// for _ in 0..240 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!(spring.is_complete());
/// assert_eq!(spring.value(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    params: SpringParams,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `initial` heading for `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64, params: SpringParams) -> Self {
        let params = SpringParams {
            stiffness: params.stiffness.max(MIN_STIFFNESS),
            damping: params.damping.max(0.0),
            mass: params.mass.max(MIN_MASS),
            rest_displacement: params.rest_displacement.abs(),
            rest_speed: params.rest_speed.abs(),
            ..params
        };
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            params,
            at_rest: false,
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity (units per second).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Physical parameters.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let spring_force = -self.params.stiffness * displacement;
        let damping_force = -self.params.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / self.params.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    fn crossed_target(&self, before: f64) -> bool {
        (before - self.target).signum() != (self.position - self.target).signum()
            && before != self.target
    }

    fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let total_secs = dt.as_secs_f64().min(MAX_ADVANCE_SECS);
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            let before = self.position;
            self.step(step_dt);
            remaining -= step_dt;
            if self.params.overshoot_clamping && self.crossed_target(before) {
                self.settle();
                return;
            }
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta <= self.params.rest_displacement
            && self.velocity.abs() <= self.params.rest_speed
        {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn default_params_match_tension_friction() {
        let p = SpringParams::default();
        assert!((p.stiffness - 230.2).abs() < 1e-9);
        assert!((p.damping - 22.0).abs() < 1e-9);
        assert_eq!(p.mass, 1.0);
        assert!(p.damping < p.critical_damping(), "default is underdamped");
    }

    #[test]
    fn reaches_target_and_rests() {
        let mut spring = Spring::new(104.0, 0.0, SpringParams::default());
        simulate(&mut spring, 300);
        assert!(spring.is_complete());
        assert_eq!(spring.value(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn default_spring_overshoots_slightly() {
        let mut spring = Spring::new(100.0, 0.0, SpringParams::default());
        let mut min_pos = f64::MAX;
        for _ in 0..300 {
            spring.tick(MS_16);
            min_pos = min_pos.min(spring.position());
        }
        assert!(min_pos < 0.0, "expected a dip below target, got {min_pos}");
        assert!(min_pos > -10.0, "overshoot too large: {min_pos}");
    }

    #[test]
    fn overshoot_clamping_never_crosses() {
        let params = SpringParams::default().with_overshoot_clamping(true);
        let mut spring = Spring::new(100.0, 0.0, params);
        for _ in 0..300 {
            spring.tick(MS_16);
            assert!(spring.position() >= 0.0);
        }
        assert!(spring.is_complete());
    }

    #[test]
    fn heavy_damping_no_overshoot() {
        let params = SpringParams::default().with_damping(200.0);
        let mut spring = Spring::new(100.0, 0.0, params);
        for _ in 0..600 {
            spring.tick(MS_16);
            assert!(spring.position() > -0.01, "pos {}", spring.position());
        }
    }

    #[test]
    fn large_dt_is_stable() {
        let mut spring = Spring::new(100.0, 0.0, SpringParams::default());
        spring.tick(Duration::from_secs(2));
        assert!(spring.position().is_finite());
        assert!(spring.position().abs() < 5.0);
    }

    #[test]
    fn huge_dt_terminates_and_settles() {
        let mut spring = Spring::new(260.0, 0.0, SpringParams::default());
        spring.tick(Duration::MAX);
        assert!(spring.is_complete());
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn zero_dt_noop() {
        let mut spring = Spring::new(40.0, 0.0, SpringParams::default());
        spring.tick(Duration::ZERO);
        assert_eq!(spring.position(), 40.0);
    }

    #[test]
    fn rest_is_sticky_until_woken() {
        let mut spring = Spring::new(10.0, 0.0, SpringParams::default());
        simulate(&mut spring, 300);
        assert!(spring.is_complete());

        simulate(&mut spring, 10);
        assert!(spring.is_complete());
        assert_eq!(spring.value(), 0.0);

        spring.reset();
        assert!(!spring.is_complete());
        spring.tick(MS_16);
        assert!(spring.position() < 10.0);
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut spring = Spring::new(80.0, 0.0, SpringParams::default());
        simulate(&mut spring, 20);
        spring.reset();
        assert_eq!(spring.position(), 80.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(!spring.is_complete());
    }

    #[test]
    fn params_are_clamped() {
        let spring = Spring::new(
            0.0,
            1.0,
            SpringParams {
                stiffness: -5.0,
                damping: -1.0,
                mass: 0.0,
                ..SpringParams::default()
            },
        );
        assert!(spring.params().stiffness > 0.0);
        assert_eq!(spring.params().damping, 0.0);
        assert!(spring.params().mass > 0.0);
    }
}

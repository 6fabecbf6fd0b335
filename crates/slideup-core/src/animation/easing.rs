#![forbid(unsafe_code)]

//! Timing curves.
//!
//! All curves map progress `t ∈ [0, 1]` to eased progress, with `f(0) = 0`
//! and `f(1) = 1`. Inputs outside the unit interval are clamped.
//!
//! The default sheet curve is [`standard`]: the classic CSS "ease" Bézier
//! `(0.42, 0, 1, 1)` mirrored into a symmetric in/out shape. It starts gently,
//! so an opening sheet does not jump, and lands softly at the resting edge.

/// Plain easing function pointer.
pub type EasingFn = fn(f64) -> f64;

/// Linear interpolation.
#[inline]
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in (accelerating).
#[inline]
#[must_use]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out (decelerating).
#[inline]
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Cubic S-curve.
#[inline]
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// The CSS "ease" curve as a cubic Bézier `(0.42, 0, 1, 1)`.
#[must_use]
pub fn ease(t: f64) -> f64 {
    const EASE: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    EASE.apply(t)
}

/// [`ease`] mirrored into a symmetric in/out curve. Default for sheet
/// transitions.
#[must_use]
pub fn standard(t: f64) -> f64 {
    in_out(ease, t)
}

/// Make any ease-in curve symmetric: first half runs `f` forwards, second
/// half runs it backwards.
#[must_use]
pub fn in_out(f: EasingFn, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        f(t * 2.0) / 2.0
    } else {
        1.0 - f((1.0 - t) * 2.0) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Cubic Bézier
// ---------------------------------------------------------------------------

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-7;
const BISECTION_LIMIT: usize = 64;

/// Unit cubic Bézier timing curve with control points `(x1, y1)` and
/// `(x2, y2)`; endpoints are fixed at `(0, 0)` and `(1, 1)`.
///
/// `x1` and `x2` must lie in `[0, 1]` so the curve is a function of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    /// Build the polynomial coefficients for the given control points.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    #[inline]
    fn sample_x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    #[inline]
    fn sample_y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    #[inline]
    fn sample_dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Find the curve parameter whose x equals `x`.
    ///
    /// Newton's method converges in a handful of steps for well-behaved
    /// curves; flat regions fall back to bisection.
    fn solve_x(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(s) - x;
            if err.abs() < NEWTON_EPSILON {
                return s;
            }
            let d = self.sample_dx(s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_LIMIT {
            let sx = self.sample_x(s);
            if (sx - x).abs() < NEWTON_EPSILON {
                break;
            }
            if x > sx {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// Eased progress for linear progress `t`.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        self.sample_y(self.solve_x(t))
    }
}

// ---------------------------------------------------------------------------
// Named curves
// ---------------------------------------------------------------------------

/// Named timing curve, for configuration surfaces that cannot carry a
/// function pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Symmetric "ease" (see [`standard`]).
    #[default]
    Standard,
}

impl Easing {
    /// The function implementing this curve.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::Ease => ease,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::Standard => standard,
        }
    }

    /// Apply the curve to `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        (self.function())(t)
    }

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::Standard => "standard",
        }
    }

    /// Parse a snake_case or camelCase curve name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease_in" | "easeIn" => Some(Self::EaseIn),
            "ease_out" | "easeOut" => Some(Self::EaseOut),
            "ease_in_out" | "easeInOut" => Some(Self::EaseInOut),
            "standard" => Some(Self::Standard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Standard,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
        }
    }

    #[test]
    fn inputs_are_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), easing.apply(0.0));
            assert_eq!(easing.apply(7.0), easing.apply(1.0));
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=200 {
                let v = easing.apply(i as f64 / 200.0);
                assert!(v + 1e-7 >= prev, "{easing:?} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn bezier_linear_control_points_are_identity() {
        let identity = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let t = i as f64 / 10.0;
            assert!((identity.apply(t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn ease_starts_slow() {
        // Ease-in family lags linear early on.
        assert!(ease(0.25) < 0.25);
    }

    #[test]
    fn standard_is_symmetric() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let mirrored = 1.0 - standard(1.0 - t);
            assert!((standard(t) - mirrored).abs() < 1e-5, "t = {t}");
        }
        assert!((standard(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(Easing::from_name("easeInOut"), Some(Easing::EaseInOut));
        assert_eq!(Easing::from_name("standard"), Some(Easing::Standard));
        assert_eq!(Easing::from_name("bounce"), None);
        for easing in ALL {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
    }
}

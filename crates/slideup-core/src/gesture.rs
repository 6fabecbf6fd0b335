#![forbid(unsafe_code)]

//! Drag-to-dismiss gesture recognition.
//!
//! [`DragRecognizer`] turns a pointer `Down → Move* → Up` sequence into live
//! sheet displacement and, on release, a [`DragResolution`].
//!
//! # State Machine
//!
//! ```text
//! Idle ──Down──▶ Dragging ──Move──▶ Dragging
//!                   │
//!                   ├──Up─────▶ Close     (displacement past threshold)
//!                   ├──Up─────▶ SnapBack  (otherwise)
//!                   └──Cancel─▶ SnapBack
//! ```
//!
//! Both resolutions return the recognizer to `Idle`.
//!
//! # Invariants
//!
//! 1. At most one drag session exists; a `Down` while dragging is refused.
//! 2. `Moved` only reports strictly positive (downward) displacement, so the
//!    offset fed from it is never negative.
//! 3. Displacement is applied 1:1; there is no scaling or rubber-banding.
//! 4. The decision is distance-only: `threshold - displacement < 0` closes.
//!    Release velocity is measured and reported but never consulted.
//! 5. A drag that never moved resolves to `SnapBack`.
//!
//! # Failure Modes
//!
//! - Events from a pointer other than the one that started the drag are
//!   ignored.
//! - `Move`/`Up` without a prior `Down` are ignored.
//! - Non-finite coordinates never reach the displacement. `Down` and `Move`
//!   carrying them are ignored; `Up`/`Cancel` still end the session, resolved
//!   from the last finite sample.

use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind, PointerId};
use crate::geometry::Vec2;

/// Default divisor applied to the sheet height to get the close threshold.
pub const DEFAULT_RELEASE_DIVISOR: f64 = 2.5;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Drag recognition tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Close threshold is `extent / release_divisor` (default: 2.5).
    pub release_divisor: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            release_divisor: DEFAULT_RELEASE_DIVISOR,
        }
    }
}

impl DragConfig {
    /// Displacement a release must exceed to close a sheet of `extent`.
    #[inline]
    #[must_use]
    pub fn threshold(&self, extent: f64) -> f64 {
        extent / self.release_divisor
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An active drag. Exists only between `Down` and `Up`/`Cancel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer: PointerId,
    origin: Vec2,
    displacement: Vec2,
    last_sample: (Instant, f64),
    velocity: f64,
}

impl DragSession {
    fn new(pointer: PointerId, origin: Vec2, now: Instant) -> Self {
        Self {
            pointer,
            origin,
            displacement: Vec2::ZERO,
            last_sample: (now, 0.0),
            velocity: 0.0,
        }
    }

    /// Where the pointer went down.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Cumulative displacement since `Down`.
    #[inline]
    #[must_use]
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Latest vertical velocity estimate (px/s, positive = downward).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    fn sample(&mut self, position: Vec2, now: Instant) {
        self.displacement = position - self.origin;
        let (last_at, last_dy) = self.last_sample;
        let dt = now.saturating_duration_since(last_at).as_secs_f64();
        if dt > 0.0 {
            self.velocity = (self.displacement.y - last_dy) / dt;
            self.last_sample = (now, self.displacement.y);
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// How a finished drag resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResolution {
    /// Finish closing the sheet.
    Close,
    /// Spring back to the open position.
    SnapBack,
}

/// Details of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub resolution: DragResolution,
    /// Vertical displacement at release.
    pub displacement: f64,
    /// Threshold the displacement was compared against.
    pub threshold: f64,
    /// Vertical velocity at release (px/s); informational only.
    pub velocity: f64,
    /// The platform cancelled the touch.
    pub cancelled: bool,
}

/// Result of feeding one pointer event to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Not relevant to the drag (wrong pointer, no session, refused start).
    Ignored,
    /// A session began.
    Started,
    /// Downward displacement to apply to the offset, 1:1.
    Moved { offset: f64 },
    /// Pointer moved but displacement is not downward; leave the offset.
    Held,
    /// The session ended.
    Released(DragRelease),
}

// ---------------------------------------------------------------------------
// DragRecognizer
// ---------------------------------------------------------------------------

/// Stateful drag recognizer for one sheet.
///
/// The caller decides whether a `Down` is allowed to arm the recognizer
/// (feature flag, hit region); the recognizer only enforces one session at
/// a time.
#[derive(Debug, Clone)]
pub struct DragRecognizer {
    config: DragConfig,
    session: Option<DragSession>,
}

impl Default for DragRecognizer {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragRecognizer {
    /// Create an idle recognizer.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Whether a drag session is active.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Drop any session without resolving it.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Resolve a release at `displacement` for a sheet of `extent`.
    #[must_use]
    pub fn resolve(&self, displacement: f64, extent: f64) -> DragResolution {
        let threshold = self.config.threshold(extent);
        if threshold - displacement < 0.0 {
            DragResolution::Close
        } else {
            DragResolution::SnapBack
        }
    }

    /// Feed one pointer event. `extent` is the sheet height used for the
    /// release threshold.
    pub fn process(&mut self, event: &PointerEvent, extent: f64, now: Instant) -> DragUpdate {
        let position = Vec2::new(event.x, event.y);
        let finite = event.x.is_finite() && event.y.is_finite();
        match event.kind {
            PointerEventKind::Down => {
                if self.session.is_some() || !finite {
                    return DragUpdate::Ignored;
                }
                self.session = Some(DragSession::new(event.id, position, now));
                DragUpdate::Started
            }
            PointerEventKind::Move => {
                let Some(session) = self.session.as_mut().filter(|s| s.pointer == event.id)
                else {
                    return DragUpdate::Ignored;
                };
                if !finite {
                    return DragUpdate::Ignored;
                }
                session.sample(position, now);
                let dy = session.displacement.y;
                if dy > 0.0 {
                    DragUpdate::Moved { offset: dy }
                } else {
                    DragUpdate::Held
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let Some(mut session) = self.session.filter(|s| s.pointer == event.id) else {
                    return DragUpdate::Ignored;
                };
                self.session = None;
                if finite {
                    session.sample(position, now);
                }

                let cancelled = event.kind == PointerEventKind::Cancel;
                let displacement = session.displacement.y;
                let resolution = if cancelled {
                    DragResolution::SnapBack
                } else {
                    self.resolve(displacement, extent)
                };
                let release = DragRelease {
                    resolution,
                    displacement,
                    threshold: self.config.threshold(extent),
                    velocity: session.velocity,
                    cancelled,
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "slideup_core",
                    displacement,
                    threshold = release.threshold,
                    velocity = release.velocity,
                    cancelled,
                    close = resolution == DragResolution::Close,
                    "gesture.release"
                );

                DragUpdate::Released(release)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const HEIGHT: f64 = 260.0;
    const MS_16: Duration = Duration::from_millis(16);

    fn drag(gr: &mut DragRecognizer, dy: f64) -> DragRelease {
        let t = Instant::now();
        assert_eq!(
            gr.process(&PointerEvent::down(50.0, 500.0), HEIGHT, t),
            DragUpdate::Started
        );
        gr.process(&PointerEvent::moved(50.0, 500.0 + dy), HEIGHT, t + MS_16);
        match gr.process(&PointerEvent::up(50.0, 500.0 + dy), HEIGHT, t + MS_16 * 2) {
            DragUpdate::Released(release) => release,
            other => panic!("expected release, got {other:?}"),
        }
    }

    #[test]
    fn threshold_is_height_over_divisor() {
        assert_eq!(DragConfig::default().threshold(HEIGHT), 104.0);
    }

    #[test]
    fn release_past_threshold_closes() {
        let mut gr = DragRecognizer::default();
        let release = drag(&mut gr, 120.0);
        assert_eq!(release.resolution, DragResolution::Close);
        assert_eq!(release.displacement, 120.0);
        assert!(!gr.is_dragging());
    }

    #[test]
    fn release_short_of_threshold_snaps_back() {
        let mut gr = DragRecognizer::default();
        assert_eq!(drag(&mut gr, 80.0).resolution, DragResolution::SnapBack);
    }

    #[test]
    fn release_exactly_at_threshold_snaps_back() {
        let mut gr = DragRecognizer::default();
        assert_eq!(drag(&mut gr, 104.0).resolution, DragResolution::SnapBack);
    }

    #[test]
    fn tap_without_movement_snaps_back() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(10.0, 10.0), HEIGHT, t);
        let update = gr.process(&PointerEvent::up(10.0, 10.0), HEIGHT, t);
        let DragUpdate::Released(release) = update else {
            panic!("expected release, got {update:?}");
        };
        assert_eq!(release.displacement, 0.0);
        assert_eq!(release.resolution, DragResolution::SnapBack);
    }

    #[test]
    fn upward_moves_are_held() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(0.0, 400.0), HEIGHT, t);
        assert_eq!(
            gr.process(&PointerEvent::moved(0.0, 350.0), HEIGHT, t + MS_16),
            DragUpdate::Held
        );
        assert_eq!(
            gr.process(&PointerEvent::moved(0.0, 400.0), HEIGHT, t + MS_16 * 2),
            DragUpdate::Held
        );
        assert_eq!(
            gr.process(&PointerEvent::moved(0.0, 430.0), HEIGHT, t + MS_16 * 3),
            DragUpdate::Moved { offset: 30.0 }
        );
    }

    #[test]
    fn second_down_is_refused() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(0.0, 0.0), HEIGHT, t);
        let second = PointerEvent::down(40.0, 40.0).with_id(PointerId(1));
        assert_eq!(gr.process(&second, HEIGHT, t), DragUpdate::Ignored);
        assert_eq!(gr.session().map(DragSession::origin), Some(Vec2::ZERO));
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(0.0, 0.0), HEIGHT, t);
        let other = PointerEvent::moved(0.0, 200.0).with_id(PointerId(7));
        assert_eq!(gr.process(&other, HEIGHT, t), DragUpdate::Ignored);
        let other_up = PointerEvent::up(0.0, 200.0).with_id(PointerId(7));
        assert_eq!(gr.process(&other_up, HEIGHT, t), DragUpdate::Ignored);
        assert!(gr.is_dragging());
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        assert_eq!(
            gr.process(&PointerEvent::moved(0.0, 100.0), HEIGHT, t),
            DragUpdate::Ignored
        );
        assert_eq!(
            gr.process(&PointerEvent::up(0.0, 100.0), HEIGHT, t),
            DragUpdate::Ignored
        );
    }

    #[test]
    fn cancel_always_snaps_back() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(0.0, 0.0), HEIGHT, t);
        gr.process(&PointerEvent::moved(0.0, 200.0), HEIGHT, t + MS_16);
        let update = gr.process(&PointerEvent::cancel(0.0, 200.0), HEIGHT, t + MS_16 * 2);
        let DragUpdate::Released(release) = update else {
            panic!("expected release, got {update:?}");
        };
        assert!(release.cancelled);
        assert_eq!(release.resolution, DragResolution::SnapBack);
        assert!(!gr.is_dragging());
    }

    #[test]
    fn velocity_is_measured_but_not_decisive() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        gr.process(&PointerEvent::down(0.0, 0.0), HEIGHT, t);
        gr.process(&PointerEvent::moved(0.0, 10.0), HEIGHT, t + MS_16);
        // A fast 60px flick: well under the 104px threshold.
        let update = gr.process(&PointerEvent::up(0.0, 60.0), HEIGHT, t + MS_16 * 2);
        let DragUpdate::Released(release) = update else {
            panic!("expected release, got {update:?}");
        };
        assert!(release.velocity > 1000.0, "velocity {}", release.velocity);
        assert_eq!(release.resolution, DragResolution::SnapBack);
    }

    #[test]
    fn non_finite_coordinates_are_ignored() {
        let mut gr = DragRecognizer::default();
        let t = Instant::now();
        assert_eq!(
            gr.process(&PointerEvent::down(0.0, f64::NAN), HEIGHT, t),
            DragUpdate::Ignored
        );
        assert!(!gr.is_dragging());

        gr.process(&PointerEvent::down(0.0, 100.0), HEIGHT, t);
        gr.process(&PointerEvent::moved(0.0, 140.0), HEIGHT, t + MS_16);
        assert_eq!(
            gr.process(&PointerEvent::moved(0.0, f64::INFINITY), HEIGHT, t + MS_16 * 2),
            DragUpdate::Ignored
        );
        assert_eq!(gr.session().map(|s| s.displacement().y), Some(40.0));

        let update = gr.process(&PointerEvent::up(0.0, f64::INFINITY), HEIGHT, t + MS_16 * 3);
        let DragUpdate::Released(release) = update else {
            panic!("expected release, got {update:?}");
        };
        assert_eq!(release.displacement, 40.0);
        assert!(release.velocity.is_finite());
        assert_eq!(release.resolution, DragResolution::SnapBack);
        assert!(!gr.is_dragging());
    }

    #[test]
    fn custom_divisor() {
        let gr = DragRecognizer::new(DragConfig {
            release_divisor: 4.0,
        });
        assert_eq!(gr.resolve(70.0, HEIGHT), DragResolution::Close);
        assert_eq!(gr.resolve(60.0, HEIGHT), DragResolution::SnapBack);
    }
}

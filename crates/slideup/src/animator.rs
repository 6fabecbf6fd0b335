#![forbid(unsafe_code)]

//! Transition animator.
//!
//! Owns the sheet's [`AnimatedOffset`] and knows the three named transitions:
//!
//! | Transition | Target | Curve |
//! |------------|--------|-------|
//! | open | `0` | timing, configured duration and easing |
//! | close | `height` | timing, configured duration and easing |
//! | snap-back | `0` | spring |
//!
//! Every transition starts from the live offset, so an interrupted open can
//! turn into a close (or a drag can turn into a snap-back) without a jump.
//! Drag moves write through [`follow_drag`](TransitionAnimator::follow_drag),
//! which supersedes whatever transition was running.

use std::time::Duration;

use slideup_core::animation::{
    AnimatedOffset, AnimationToken, Curve, DriverKind, EasingFn, SpringParams,
};

use crate::config::SheetConfig;

/// Which named transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Open,
    Close,
    SnapBack,
}

/// A transition that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEnd {
    pub kind: TransitionKind,
    pub token: AnimationToken,
}

/// Drives the sheet offset between open (`0`) and hidden (`height`).
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    offset: AnimatedOffset,
    height: f64,
    duration: Duration,
    easing: EasingFn,
    spring: SpringParams,
    in_flight: Option<(TransitionKind, AnimationToken)>,
}

impl TransitionAnimator {
    /// Create an animator parked at the hidden position.
    #[must_use]
    pub fn new(config: &SheetConfig) -> Self {
        Self {
            offset: AnimatedOffset::new(config.height()),
            height: config.height(),
            duration: config.duration(),
            easing: config.easing().function(),
            spring: *config.spring(),
            in_flight: None,
        }
    }

    /// Current offset: `0` fully open, `height` fully hidden.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The transition in flight, if any.
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<TransitionKind> {
        self.in_flight.map(|(kind, _)| kind)
    }

    #[inline]
    #[must_use]
    pub fn driver_kind(&self) -> DriverKind {
        self.offset.driver_kind()
    }

    fn start(&mut self, kind: TransitionKind, target: f64, curve: Curve) -> AnimationToken {
        let token = self.offset.animate_to(target, curve);
        self.in_flight = Some((kind, token));
        token
    }

    fn timing(&self) -> Curve {
        Curve::timing(self.duration, self.easing)
    }

    /// Animate to fully open over the configured duration.
    pub fn open_transition(&mut self) -> AnimationToken {
        self.start(TransitionKind::Open, 0.0, self.timing())
    }

    /// Animate to fully hidden over the configured duration.
    pub fn close_transition(&mut self) -> AnimationToken {
        self.start(TransitionKind::Close, self.height, self.timing())
    }

    /// Spring back to fully open.
    pub fn snap_back(&mut self) -> AnimationToken {
        self.start(TransitionKind::SnapBack, 0.0, Curve::spring(self.spring))
    }

    /// Write a live drag position, superseding any transition.
    pub fn follow_drag(&mut self, offset: f64) {
        self.offset.set_to(offset);
        self.in_flight = None;
    }

    /// Jump to the hidden position with nothing in flight.
    pub fn park(&mut self) {
        self.offset.set_to(self.height);
        self.in_flight = None;
    }

    /// Advance one frame. Reports the transition that completed on this
    /// frame, if any.
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionEnd> {
        let done = self.offset.tick(dt)?;
        let (kind, token) = self.in_flight.take()?;
        debug_assert_eq!(token, done.token);
        (token == done.token).then_some(TransitionEnd { kind, token })
    }
}

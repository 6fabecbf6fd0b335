#![forbid(unsafe_code)]

//! The bottom-sheet controller.
//!
//! [`BottomSheet`] ties three state streams together:
//!
//! - visibility ([`VisibilityMachine`]): `Hidden` or `Showing`
//! - the animated vertical offset ([`TransitionAnimator`])
//! - the drag gesture ([`DragRecognizer`])
//!
//! The host drives it with two kinds of input: commands and events
//! ([`open`](BottomSheet::open), [`close`](BottomSheet::close),
//! [`handle_event`](BottomSheet::handle_event)) and frames
//! ([`tick`](BottomSheet::tick)). After each frame it reads a
//! [`SheetFrame`] and draws.
//!
//! # Close finalization
//!
//! When the close transition completes, and only if no later writer
//! superseded it, the sheet runs these steps in order:
//!
//! 1. reset the pan transform to `(0, 0)`
//! 2. park the offset at `height`
//! 3. drop any drag session
//! 4. `Showing → Hidden`
//! 5. call `on_close`
//!
//! `on_close` runs last, so a panic inside it unwinds out of `tick` with the
//! sheet already in a consistent `Hidden` state.
//!
//! # Invariants
//!
//! 1. After settling, visibility matches the last `open()`/`close()` call.
//! 2. `on_close` runs exactly once per completed close and never for a
//!    snap-back.
//! 3. Only one writer owns the offset: a drag move supersedes any running
//!    transition, and a new transition supersedes the drag.
//! 4. A drag can only start while `Showing`, with drag-to-dismiss enabled and
//!    no other drag active.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use slideup::{BottomSheet, SheetOptions, Visibility};
//!
//! let mut sheet = BottomSheet::from_options(SheetOptions::new().height(300.0))?;
//! sheet.open();
//! assert_eq!(sheet.visibility(), Visibility::Showing);
//!
//! for _ in 0..30 {
//!     sheet.tick(Duration::from_millis(16));
//! }
//! assert_eq!(sheet.frame().translate_y, 0.0);
//! # Ok::<(), slideup::ConfigError>(())
//! ```

use std::fmt;
use std::time::Duration;

use slideup_core::animation::AnimationToken;
use slideup_core::event::{Event, PointerEvent, PointerEventKind};
use slideup_core::geometry::Vec2;
use slideup_core::gesture::{DragRecognizer, DragRelease, DragResolution, DragUpdate};
use web_time::Instant;

use crate::animator::{TransitionAnimator, TransitionKind};
use crate::config::{DragArea, SheetConfig, SheetOptions};
use crate::error::ConfigError;
use crate::frame::{FrameChanges, SheetFrame, SheetPhase};
use crate::visibility::{CloseOutcome, OpenOutcome, Visibility, VisibilityMachine};

/// Hit region a pointer `Down` landed in, as resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetRegion {
    /// The dimmed area outside the panel.
    Backdrop,
    /// The drag handle at the top of the panel.
    Handle,
    /// Anywhere else on the panel.
    Content,
}

/// What an input event did to the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetAction {
    /// A backdrop press or back request started a close.
    Close,
    /// A drag session began.
    DragStart,
    /// The drag wrote this offset.
    DragMove { offset: f64 },
    /// The drag moved upward of its origin; the offset was left alone.
    DragHold,
    /// The drag ended.
    DragRelease(DragResolution),
}

/// Default sheet content: nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyContent;

/// Callback run after a close completes.
pub type CloseCallback = Box<dyn FnMut()>;

/// Headless bottom sheet.
///
/// `C` is whatever the host renders inside the panel; the sheet stores it but
/// never looks at it.
pub struct BottomSheet<C = EmptyContent> {
    config: SheetConfig,
    visibility: VisibilityMachine,
    animator: TransitionAnimator,
    recognizer: DragRecognizer,
    pan: Vec2,
    on_close: Option<CloseCallback>,
    content: C,
    pending: FrameChanges,
    last_phase: SheetPhase,
}

impl BottomSheet<EmptyContent> {
    /// Create a hidden sheet.
    #[must_use]
    pub fn new(config: SheetConfig) -> Self {
        Self {
            animator: TransitionAnimator::new(&config),
            recognizer: DragRecognizer::new(*config.drag()),
            config,
            visibility: VisibilityMachine::new(),
            pan: Vec2::ZERO,
            on_close: None,
            content: EmptyContent,
            pending: FrameChanges::empty(),
            last_phase: SheetPhase::Hidden,
        }
    }

    /// Validate `options` and create a hidden sheet.
    pub fn from_options(options: SheetOptions) -> Result<Self, ConfigError> {
        options.validate().map(Self::new)
    }
}

impl Default for BottomSheet<EmptyContent> {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

impl<C> BottomSheet<C> {
    /// Replace the panel content (builder pattern).
    #[must_use]
    pub fn with_content<D>(self, content: D) -> BottomSheet<D> {
        BottomSheet {
            config: self.config,
            visibility: self.visibility,
            animator: self.animator,
            recognizer: self.recognizer,
            pan: self.pan,
            on_close: self.on_close,
            content,
            pending: self.pending,
            last_phase: self.last_phase,
        }
    }

    /// Run `f` after every completed close (builder pattern).
    #[must_use]
    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.visibility()
    }

    /// Whether the overlay is mounted.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility().is_showing()
    }

    /// Current vertical offset: `0` open, `height` hidden.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.animator.offset()
    }

    /// Pan transform composed on top of the offset.
    #[inline]
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Set the pan transform. Reset to `(0, 0)` whenever a close completes.
    pub fn set_pan(&mut self, pan: Vec2) {
        if pan != self.pan {
            self.pan = pan;
            self.pending |= FrameChanges::PAN;
        }
    }

    /// Whether a drag session is active.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.recognizer.is_dragging()
    }

    #[must_use]
    pub fn phase(&self) -> SheetPhase {
        if !self.is_visible() {
            return SheetPhase::Hidden;
        }
        if self.recognizer.is_dragging() {
            return SheetPhase::Dragging;
        }
        match self.animator.in_flight() {
            Some(TransitionKind::Open) => SheetPhase::Opening,
            Some(TransitionKind::Close) => SheetPhase::Closing,
            Some(TransitionKind::SnapBack) => SheetPhase::SnappingBack,
            None => SheetPhase::Open,
        }
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn frame(&self) -> SheetFrame {
        SheetFrame {
            visibility: self.visibility(),
            phase: self.phase(),
            translate_y: self.animator.offset(),
            pan: self.pan,
            height: self.config.height(),
            animation_type: self.config.animation_type(),
            show_drag_handle: self.config.close_on_drag_down(),
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Show the sheet and animate it open.
    ///
    /// No-op while already showing, unless a close is in flight: then the
    /// close is abandoned (its `on_close` never fires) and the sheet animates
    /// back open from where it is.
    pub fn open(&mut self) {
        match self.visibility.request_open() {
            OpenOutcome::AlreadyShowing => return,
            OpenOutcome::Mounted => {
                self.pending |= FrameChanges::VISIBILITY;
                tracing::debug!(
                    target: "slideup",
                    height = self.config.height(),
                    duration_ms = self.config.duration().as_millis() as u64,
                    "sheet.open"
                );
            }
            OpenOutcome::ReversedClose => {
                tracing::debug!(target: "slideup", from = self.animator.offset(), "sheet.open.reverse");
            }
        }
        self.animator.open_transition();
    }

    /// Animate the sheet closed, then hide it and call `on_close`.
    ///
    /// No-op while hidden. Calling again while a close is running restarts
    /// the transition from the current offset; the earlier one never
    /// completes. Any active drag is dropped.
    pub fn close(&mut self) {
        let outcome = self.visibility.request_close();
        if outcome == CloseOutcome::AlreadyHidden {
            return;
        }
        self.recognizer.reset();
        let token = self.animator.close_transition();
        self.visibility.attach_close(token);

        if outcome == CloseOutcome::Restarted {
            tracing::debug!(
                target: "slideup",
                generation = token.generation(),
                from = self.animator.offset(),
                "sheet.close.restart"
            );
        } else {
            tracing::debug!(
                target: "slideup",
                generation = token.generation(),
                from = self.animator.offset(),
                "sheet.close"
            );
        }
    }

    /// Backdrop pressed. Closes if `close_on_press_mask`; returns whether a
    /// close was requested.
    pub fn press_mask(&mut self) -> bool {
        let accepted = self.config.close_on_press_mask() && self.is_visible();
        tracing::debug!(target: "slideup", accepted, "sheet.mask.press");
        if accepted {
            self.close();
        }
        accepted
    }

    /// Platform back request. Closes if `close_on_press_back`; returns
    /// whether a close was requested.
    pub fn press_back(&mut self) -> bool {
        let accepted = self.config.close_on_press_back() && self.is_visible();
        tracing::debug!(target: "slideup", accepted, "sheet.back.press");
        if accepted {
            self.close();
        }
        accepted
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route an input event. `region` is where a pointer `Down` landed;
    /// it is ignored for other pointer phases and for `Back`.
    pub fn handle_event(&mut self, event: &Event, region: Option<SheetRegion>) -> Option<SheetAction> {
        self.handle_event_at(event, region, Instant::now())
    }

    /// [`handle_event`](Self::handle_event) with an explicit timestamp.
    pub fn handle_event_at(
        &mut self,
        event: &Event,
        region: Option<SheetRegion>,
        now: Instant,
    ) -> Option<SheetAction> {
        match event {
            Event::Back => self.press_back().then_some(SheetAction::Close),
            Event::Pointer(pointer) => self.handle_pointer_at(pointer, region, now),
        }
    }

    /// Route a pointer event with an explicit timestamp.
    pub fn handle_pointer_at(
        &mut self,
        event: &PointerEvent,
        region: Option<SheetRegion>,
        now: Instant,
    ) -> Option<SheetAction> {
        if event.kind != PointerEventKind::Down {
            return self.continue_drag(event, now);
        }
        match region? {
            SheetRegion::Backdrop => self.press_mask().then_some(SheetAction::Close),
            region @ (SheetRegion::Handle | SheetRegion::Content) => {
                self.begin_drag(event, region, now)
            }
        }
    }

    fn can_start_drag(&self, region: SheetRegion) -> bool {
        let area_ok = match self.config.drag_area() {
            DragArea::WholeSheet => true,
            DragArea::HandleOnly => region == SheetRegion::Handle,
        };
        self.config.close_on_drag_down()
            && self.is_visible()
            && !self.recognizer.is_dragging()
            && area_ok
    }

    fn begin_drag(
        &mut self,
        event: &PointerEvent,
        region: SheetRegion,
        now: Instant,
    ) -> Option<SheetAction> {
        if !self.can_start_drag(region) {
            return None;
        }
        match self.recognizer.process(event, self.config.height(), now) {
            DragUpdate::Started => {
                tracing::debug!(
                    target: "slideup",
                    ?region,
                    x = event.x,
                    y = event.y,
                    offset = self.animator.offset(),
                    "sheet.drag.start"
                );
                Some(SheetAction::DragStart)
            }
            _ => None,
        }
    }

    fn continue_drag(&mut self, event: &PointerEvent, now: Instant) -> Option<SheetAction> {
        match self.recognizer.process(event, self.config.height(), now) {
            DragUpdate::Ignored | DragUpdate::Started => None,
            DragUpdate::Held => Some(SheetAction::DragHold),
            DragUpdate::Moved { offset } => {
                if self.visibility.abandon_close() {
                    tracing::debug!(target: "slideup", offset, "sheet.close.abandon");
                }
                self.animator.follow_drag(offset);
                self.pending |= FrameChanges::OFFSET;
                Some(SheetAction::DragMove { offset })
            }
            DragUpdate::Released(release) => {
                self.finish_drag(&release);
                Some(SheetAction::DragRelease(release.resolution))
            }
        }
    }

    fn finish_drag(&mut self, release: &DragRelease) {
        let decision = match release.resolution {
            DragResolution::Close => "close",
            DragResolution::SnapBack => "snap_back",
        };
        tracing::debug!(
            target: "slideup",
            displacement = release.displacement,
            threshold = release.threshold,
            velocity = release.velocity,
            cancelled = release.cancelled,
            decision,
            "sheet.drag.release"
        );

        match release.resolution {
            DragResolution::Close => self.close(),
            // A drag that never wrote the offset leaves a running transition
            // alone; there is nothing to restore.
            DragResolution::SnapBack if self.animator.in_flight().is_none() => {
                tracing::debug!(target: "slideup", from = self.animator.offset(), "sheet.snap_back");
                self.animator.snap_back();
            }
            DragResolution::SnapBack => {}
        }
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Advance animations by `dt` and run any close finalization that falls
    /// due. Returns everything that changed since the previous tick,
    /// including changes made by commands and events in between.
    pub fn tick(&mut self, dt: Duration) -> FrameChanges {
        let _span = tracing::trace_span!("sheet.tick", dt_us = dt.as_micros() as u64).entered();

        let mut changes = std::mem::take(&mut self.pending);
        let before = self.animator.offset();

        if let Some(end) = self.animator.tick(dt) {
            match end.kind {
                TransitionKind::Close if self.visibility.is_pending(end.token) => {
                    changes |= self.finish_close(end.token);
                }
                TransitionKind::Close => {}
                TransitionKind::Open => {
                    tracing::trace!(target: "slideup", "sheet.open.complete");
                }
                TransitionKind::SnapBack => {
                    tracing::trace!(target: "slideup", "sheet.snap_back.complete");
                }
            }
        }

        if self.animator.offset() != before {
            changes |= FrameChanges::OFFSET;
        }
        let phase = self.phase();
        if phase != self.last_phase {
            self.last_phase = phase;
            changes |= FrameChanges::PHASE;
        }
        changes
    }

    fn finish_close(&mut self, token: AnimationToken) -> FrameChanges {
        let mut changes = FrameChanges::VISIBILITY | FrameChanges::CLOSED;
        if self.pan != Vec2::ZERO {
            self.pan = Vec2::ZERO;
            changes |= FrameChanges::PAN;
        }
        self.animator.park();
        self.recognizer.reset();
        self.visibility.finish_close(token);

        tracing::debug!(
            target: "slideup",
            generation = token.generation(),
            has_callback = self.on_close.is_some(),
            "sheet.close.complete"
        );
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
        changes
    }
}

impl<C: fmt::Debug> fmt::Debug for BottomSheet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomSheet")
            .field("config", &self.config)
            .field("visibility", &self.visibility.visibility())
            .field("phase", &self.phase())
            .field("offset", &self.animator.offset())
            .field("pan", &self.pan)
            .field("dragging", &self.recognizer.is_dragging())
            .field("on_close", &self.on_close.is_some())
            .field("content", &self.content)
            .finish()
    }
}

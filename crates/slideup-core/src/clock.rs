#![forbid(unsafe_code)]

//! Frame clock: turns host frame timestamps into animation deltas.
//!
//! Render loops hand us absolute timestamps; animations want deltas. The
//! clock also caps each delta so a stalled frame (app backgrounded, debugger
//! paused) does not teleport a transition to its end or destabilize springs.

use std::time::Duration;

use web_time::Instant;

/// Default cap for a single frame delta.
pub const DEFAULT_MAX_FRAME: Duration = Duration::from_millis(100);

/// Converts successive frame timestamps into capped deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_frame: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock with the default cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }

    /// Set the per-frame cap (builder pattern).
    #[must_use]
    pub fn with_max_frame(mut self, max_frame: Duration) -> Self {
        self.max_frame = max_frame;
        self
    }

    /// Record a frame at `now` and return the delta since the previous one.
    ///
    /// The first frame, and any timestamp earlier than the previous one,
    /// yields `Duration::ZERO`.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt.min(self.max_frame)
    }

    /// Forget the previous timestamp (e.g. after the sheet unmounts).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

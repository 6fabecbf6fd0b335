#![forbid(unsafe_code)]

//! Logical visibility of the sheet.
//!
//! State machine: `Hidden → Showing → (close pending) → Hidden`
//!
//! `Showing` is entered synchronously on `open()`. It is left only when the
//! close transition that was attached to it completes; a close that is
//! superseded (by a drag writing the offset, or by a reversing `open()`)
//! never finishes and the sheet stays `Showing`.
//!
//! # Invariants
//!
//! - At most one close is pending, identified by its animation token.
//! - `finish_close` only succeeds for the pending token.
//! - While `Hidden`, nothing is pending.

use slideup_core::animation::AnimationToken;

/// Whether the overlay is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Unmounted. Initial and resting state.
    #[default]
    Hidden,
    /// Mounted, including while a close transition is running.
    Showing,
}

impl Visibility {
    #[inline]
    #[must_use]
    pub fn is_showing(self) -> bool {
        matches!(self, Self::Showing)
    }
}

/// Result of [`VisibilityMachine::request_open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// `Hidden → Showing`; the overlay mounts.
    Mounted,
    /// A pending close was abandoned; the sheet stays mounted.
    ReversedClose,
    /// Already showing with no close pending.
    AlreadyShowing,
}

/// Result of [`VisibilityMachine::request_close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A close should start.
    Started,
    /// A close was already pending; it should restart under a new token.
    Restarted,
    /// Nothing to close.
    AlreadyHidden,
}

/// Authoritative visibility plus the pending close, if any.
#[derive(Debug, Clone, Default)]
pub struct VisibilityMachine {
    visibility: Visibility,
    pending_close: Option<AnimationToken>,
}

impl VisibilityMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether a close transition is pending.
    #[inline]
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.pending_close.is_some()
    }

    /// Whether `token` is the pending close.
    #[inline]
    #[must_use]
    pub fn is_pending(&self, token: AnimationToken) -> bool {
        self.pending_close == Some(token)
    }

    pub fn request_open(&mut self) -> OpenOutcome {
        match self.visibility {
            Visibility::Hidden => {
                self.visibility = Visibility::Showing;
                OpenOutcome::Mounted
            }
            Visibility::Showing if self.pending_close.take().is_some() => {
                OpenOutcome::ReversedClose
            }
            Visibility::Showing => OpenOutcome::AlreadyShowing,
        }
    }

    /// Ask to close. The caller starts the transition and hands its token
    /// to [`attach_close`](Self::attach_close).
    pub fn request_close(&mut self) -> CloseOutcome {
        match self.visibility {
            Visibility::Hidden => CloseOutcome::AlreadyHidden,
            Visibility::Showing if self.pending_close.is_some() => CloseOutcome::Restarted,
            Visibility::Showing => CloseOutcome::Started,
        }
    }

    /// Bind the running close transition. Replaces any earlier token.
    pub fn attach_close(&mut self, token: AnimationToken) {
        debug_assert!(self.visibility.is_showing(), "close attached while hidden");
        self.pending_close = Some(token);
    }

    /// Drop the pending close without finishing it. Returns whether one was
    /// pending.
    pub fn abandon_close(&mut self) -> bool {
        self.pending_close.take().is_some()
    }

    /// `Showing → Hidden` if `token` is the pending close.
    pub fn finish_close(&mut self, token: AnimationToken) -> bool {
        if !self.is_pending(token) {
            return false;
        }
        self.pending_close = None;
        self.visibility = Visibility::Hidden;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideup_core::animation::{AnimatedOffset, Curve, linear};
    use std::time::Duration;

    fn tokens(n: usize) -> Vec<AnimationToken> {
        let mut offset = AnimatedOffset::new(0.0);
        (0..n)
            .map(|_| offset.animate_to(1.0, Curve::timing(Duration::ZERO, linear)))
            .collect()
    }

    #[test]
    fn starts_hidden() {
        let vm = VisibilityMachine::new();
        assert_eq!(vm.visibility(), Visibility::Hidden);
        assert!(!vm.is_closing());
    }

    #[test]
    fn open_mounts_once() {
        let mut vm = VisibilityMachine::new();
        assert_eq!(vm.request_open(), OpenOutcome::Mounted);
        assert_eq!(vm.request_open(), OpenOutcome::AlreadyShowing);
        assert!(vm.visibility().is_showing());
    }

    #[test]
    fn close_while_hidden_is_noop() {
        let mut vm = VisibilityMachine::new();
        assert_eq!(vm.request_close(), CloseOutcome::AlreadyHidden);
    }

    #[test]
    fn close_finishes_only_for_pending_token() {
        let t = tokens(2);
        let mut vm = VisibilityMachine::new();
        vm.request_open();
        assert_eq!(vm.request_close(), CloseOutcome::Started);
        vm.attach_close(t[0]);
        assert!(vm.visibility().is_showing(), "stays showing until complete");

        assert!(!vm.finish_close(t[1]));
        assert!(vm.finish_close(t[0]));
        assert_eq!(vm.visibility(), Visibility::Hidden);
        assert!(!vm.is_closing());
    }

    #[test]
    fn second_close_restarts() {
        let t = tokens(2);
        let mut vm = VisibilityMachine::new();
        vm.request_open();
        vm.request_close();
        vm.attach_close(t[0]);
        assert_eq!(vm.request_close(), CloseOutcome::Restarted);
        vm.attach_close(t[1]);
        assert!(!vm.finish_close(t[0]), "old token is stale");
        assert!(vm.finish_close(t[1]));
    }

    #[test]
    fn open_reverses_pending_close() {
        let t = tokens(1);
        let mut vm = VisibilityMachine::new();
        vm.request_open();
        vm.request_close();
        vm.attach_close(t[0]);
        assert_eq!(vm.request_open(), OpenOutcome::ReversedClose);
        assert!(!vm.finish_close(t[0]));
        assert!(vm.visibility().is_showing());
    }

    #[test]
    fn abandon_reports_whether_pending() {
        let t = tokens(1);
        let mut vm = VisibilityMachine::new();
        vm.request_open();
        assert!(!vm.abandon_close());
        vm.request_close();
        vm.attach_close(t[0]);
        assert!(vm.abandon_close());
        assert!(!vm.is_closing());
    }
}

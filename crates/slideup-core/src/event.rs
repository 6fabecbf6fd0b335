#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Hosts translate their platform touch/mouse callbacks into [`Event`]s. All
//! coordinates are logical pixels in screen space with `y` growing downward,
//! so a downward drag produces a positive vertical displacement.
//!
//! # Design Notes
//!
//! - Only one pointer participates in a drag; events carry a [`PointerId`]
//!   so secondary touches can be ignored.
//! - `Cancel` is distinct from `Up`: the platform took the touch away, the
//!   user did not lift their finger.

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A touch or mouse event.
    Pointer(PointerEvent),
    /// Platform back navigation (hardware back button, Escape).
    Back,
}

/// Identifier distinguishing simultaneous touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u32);

/// Pointer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Finger or button went down.
    Down,
    /// Pointer moved while down.
    Move,
    /// Finger or button lifted.
    Up,
    /// The platform terminated the touch.
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub id: PointerId,
}

impl PointerEvent {
    /// Create a pointer event for the primary pointer.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            id: PointerId(0),
        }
    }

    /// Tag the event with a pointer id (builder pattern).
    #[must_use]
    pub const fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    #[must_use]
    pub const fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Cancel, x, y)
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

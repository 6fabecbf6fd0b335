#![forbid(unsafe_code)]

//! What the presentation layer reads each frame.

use bitflags::bitflags;
use slideup_core::geometry::Vec2;

use crate::config::AnimationType;
use crate::visibility::Visibility;

bitflags! {
    /// What changed since the previous [`tick`](crate::BottomSheet::tick).
    ///
    /// Hosts re-render only when this is non-empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameChanges: u8 {
        /// The vertical offset moved.
        const OFFSET = 0b0000_0001;
        /// The overlay mounted or unmounted.
        const VISIBILITY = 0b0000_0010;
        /// The pan transform changed.
        const PAN = 0b0000_0100;
        /// A close completed and `on_close` ran.
        const CLOSED = 0b0000_1000;
        /// [`SheetPhase`] changed.
        const PHASE = 0b0001_0000;
    }
}

/// Fine-grained lifecycle phase, derived from visibility, the in-flight
/// transition and the drag recognizer.
///
/// ```text
/// Hidden ──open──▶ Opening ──▶ Open ──close──▶ Closing ──▶ Hidden
///                     │          │                ▲
///                     └──drag────┴─▶ Dragging ────┤ (past threshold)
///                                       │         │
///                                       ▼         │
///                                 SnappingBack ──▶ Open
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPhase {
    #[default]
    Hidden,
    Opening,
    Open,
    /// A drag session is active.
    Dragging,
    SnappingBack,
    Closing,
}

impl SheetPhase {
    /// Whether the overlay is mounted in this phase.
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether an animation is driving the offset.
    #[inline]
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::SnappingBack | Self::Closing)
    }
}

/// Snapshot of everything needed to draw the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFrame {
    pub visibility: Visibility,
    pub phase: SheetPhase,
    /// Vertical translation of the panel: `0` open, `height` hidden.
    pub translate_y: f64,
    /// Extra translation composed on top of `translate_y`.
    pub pan: Vec2,
    pub height: f64,
    /// Passed through to the modal layer.
    pub animation_type: AnimationType,
    /// Show the drag handle (drag-to-dismiss is enabled).
    pub show_drag_handle: bool,
}

impl SheetFrame {
    /// Total translation to apply to the panel.
    #[must_use]
    pub fn transform(&self) -> Vec2 {
        self.pan + Vec2::new(0.0, self.translate_y)
    }

    /// Fraction of the panel on screen, `0.0..=1.0`. Useful for backdrop
    /// opacity.
    #[must_use]
    pub fn open_fraction(&self) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (1.0 - self.translate_y / self.height).clamp(0.0, 1.0)
    }
}

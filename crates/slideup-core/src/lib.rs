// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: animation primitives, drag gesture recognition, and frame timing.
//!
//! # Role in slideup
//! `slideup-core` is the motion layer. It owns the single-writer
//! [`AnimatedOffset`](animation::AnimatedOffset) handle, the timing and spring
//! curves that drive it, and the pointer-level [`DragRecognizer`](gesture::DragRecognizer)
//! that turns raw touch input into sheet-relative displacement.
//!
//! # Primary responsibilities
//! - **Animation**: eased tweens, damped springs, and the generation-token
//!   offset handle that decides which driver owns the value.
//! - **Gesture**: `Idle → Dragging → {Commit | SnapBack}` drag resolution.
//! - **Event**: canonical pointer and navigation events.
//! - **FrameClock**: converts host timestamps into capped frame deltas.
//!
//! # How it fits in the system
//! The `slideup` crate composes these pieces into the bottom-sheet controller.
//! Nothing here knows about visibility or callbacks; that keeps the
//! primitives deterministic and easy to drive from tests.

pub mod animation;
pub mod clock;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#![forbid(unsafe_code)]

//! Headless slide-up bottom sheet.
//!
//! A bottom sheet is a panel that animates in from the bottom edge of the
//! screen, can be dismissed by dragging it down or by tapping the backdrop,
//! and exposes imperative `open()`/`close()` to its host. This crate owns the
//! state and motion; the host owns drawing.
//!
//! # Frame loop
//!
//! ```
//! use slideup::{BottomSheet, FrameChanges, FrameClock, SheetOptions};
//! use web_time::Instant;
//!
//! let mut sheet = BottomSheet::from_options(SheetOptions::default())?;
//! let mut clock = FrameClock::new();
//! sheet.open();
//!
//! let changes = sheet.tick(clock.advance(Instant::now()));
//! if changes.contains(FrameChanges::VISIBILITY) {
//!     // mount the overlay
//! }
//! let frame = sheet.frame();
//! // draw the panel translated by frame.translate_y
//! # let _ = frame;
//! # Ok::<(), slideup::ConfigError>(())
//! ```
//!
//! # Crate layout
//!
//! - [`config`]: raw options and the validated [`SheetConfig`]
//! - [`visibility`]: `Hidden`/`Showing` state machine
//! - [`animator`]: open, close and snap-back transitions
//! - [`sheet`]: the [`BottomSheet`] controller
//! - [`frame`]: per-frame output
//!
//! Motion primitives (tweens, springs, the drag recognizer) live in
//! [`slideup_core`] and are re-exported here.

pub mod animator;
pub mod config;
pub mod error;
pub mod frame;
pub mod sheet;
pub mod visibility;

pub use animator::{TransitionAnimator, TransitionEnd, TransitionKind};
pub use config::{
    AnimationType, CustomStyles, DragArea, SheetConfig, SheetOptions, SpringOptions, StyleProps,
};
#[cfg(feature = "config")]
pub use error::LoadError;
pub use error::ConfigError;
pub use frame::{FrameChanges, SheetFrame, SheetPhase};
pub use sheet::{BottomSheet, CloseCallback, EmptyContent, SheetAction, SheetRegion};
pub use visibility::{Visibility, VisibilityMachine};

pub use slideup_core;
pub use slideup_core::animation::{Easing, SpringParams};
pub use slideup_core::clock::FrameClock;
pub use slideup_core::event::{Event, PointerEvent, PointerEventKind, PointerId};
pub use slideup_core::geometry::Vec2;
pub use slideup_core::gesture::DragResolution;
#[cfg(feature = "tracing-json")]
pub use slideup_core::logging::init_json_logging;

#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can write `slideup_core::debug!(..)` without
//! naming `tracing` themselves. With `tracing-json`, [`init_json_logging`]
//! installs a JSON formatter filtered by `RUST_LOG`.
//!
//! Without either feature the module is empty and instrumentation in this
//! crate compiles away.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Default filter used when `RUST_LOG` is unset.
#[cfg(feature = "tracing-json")]
pub const DEFAULT_FILTER: &str = "slideup=info,slideup_core=info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed; the existing
/// one is left untouched.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}

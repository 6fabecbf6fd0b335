#![forbid(unsafe_code)]

//! Error types.
//!
//! Sheet operations themselves cannot fail: redundant `open()`/`close()`
//! calls are no-ops and gesture input that does not apply is ignored. The only
//! failures are a bad configuration, caught when options are validated, and
//! (with the `config` feature) failing to read or parse an options file.

use std::fmt;

/// Invalid sheet configuration.
///
/// These are caller programming errors; the sheet refuses to build rather
/// than clamping silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `height` must be positive.
    InvalidHeight(f64),
    /// `duration_ms` must be zero or positive.
    NegativeDuration(f64),
    /// `duration_ms` does not fit in a `Duration`.
    DurationOverflow(f64),
    /// `min_closing_height` must lie in `[0, height]`.
    InvalidMinClosingHeight { min_closing_height: f64, height: f64 },
    /// The drag release divisor must be positive.
    InvalidReleaseDivisor(f64),
    /// A numeric option was NaN or infinite.
    NonFinite { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeight(h) => write!(f, "sheet height must be positive, got {h}"),
            Self::NegativeDuration(d) => {
                write!(f, "animation duration must be non-negative, got {d}ms")
            }
            Self::DurationOverflow(d) => write!(f, "animation duration {d}ms is too long"),
            Self::InvalidMinClosingHeight {
                min_closing_height,
                height,
            } => write!(
                f,
                "min closing height {min_closing_height} must be within [0, {height}]"
            ),
            Self::InvalidReleaseDivisor(d) => {
                write!(f, "drag release divisor must be positive, got {d}")
            }
            Self::NonFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure loading options from a file or string.
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum LoadError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// TOML syntax or shape error.
    Toml(toml::de::Error),
    /// JSON syntax or shape error.
    Json(serde_json::Error),
    /// The options parsed but did not validate.
    Invalid(ConfigError),
}

#[cfg(feature = "config")]
impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid sheet options: {e}"),
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

#[cfg(feature = "config")]
impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        Self::Invalid(e)
    }
}

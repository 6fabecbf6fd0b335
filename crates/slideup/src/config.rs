#![forbid(unsafe_code)]

//! Sheet configuration.
//!
//! Two layers:
//!
//! - [`SheetOptions`]: raw, host-facing options. Every field has a default,
//!   numbers are plain `f64` (milliseconds for durations) and, with the
//!   `config` feature, the whole struct loads from TOML or JSON.
//! - [`SheetConfig`]: the validated, immutable configuration a
//!   [`BottomSheet`](crate::BottomSheet) is built from.
//!
//! ```toml
//! # sheet.toml
//! height = 320
//! duration_ms = 250
//! close_on_press_mask = false
//! easing = "ease_out"
//!
//! [custom_styles.container]
//! background = "#fff"
//! ```
//!
//! ```rust,ignore
//! let config = SheetConfig::from_toml_file("sheet.toml")?;
//! ```
//!
//! # Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | `animation_type` | `fade` |
//! | `height` | 260 |
//! | `min_closing_height` | 0 |
//! | `duration_ms` | 300 |
//! | `close_on_drag_down` | true |
//! | `close_on_press_mask` | true |
//! | `close_on_press_back` | true |
//! | `easing` | `standard` |
//! | `drag_area` | `whole_sheet` |
//! | `release_divisor` | 2.5 |

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

use ahash::AHashMap;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use slideup_core::animation::{Easing, SpringParams};
use slideup_core::gesture::{DEFAULT_RELEASE_DIVISOR, DragConfig};

use crate::error::ConfigError;
#[cfg(feature = "config")]
use crate::error::LoadError;

pub const DEFAULT_HEIGHT: f64 = 260.0;
pub const DEFAULT_DURATION_MS: f64 = 300.0;

// ---------------------------------------------------------------------------
// Passthrough types
// ---------------------------------------------------------------------------

/// Presentation animation for the surrounding modal layer.
///
/// Not interpreted by the sheet; handed to the presentation layer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum AnimationType {
    None,
    Slide,
    #[default]
    Fade,
}

/// Which part of the sheet arms the drag-to-dismiss gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum DragArea {
    /// Any touch on the sheet starts a drag.
    #[default]
    WholeSheet,
    /// Only touches on the drag handle start a drag.
    HandleOnly,
}

/// Opaque style properties, passed through to the presentation layer.
pub type StyleProps = AHashMap<String, String>;

/// Style overrides for the sheet's visual parts. Never read by the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CustomStyles {
    pub wrapper: StyleProps,
    pub container: StyleProps,
    #[cfg_attr(feature = "config", serde(alias = "draggableIcon"))]
    pub draggable_icon: StyleProps,
}

/// Snap-back spring tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SpringOptions {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub overshoot_clamping: bool,
}

impl Default for SpringOptions {
    fn default() -> Self {
        let params = SpringParams::default();
        Self {
            stiffness: params.stiffness,
            damping: params.damping,
            mass: params.mass,
            overshoot_clamping: params.overshoot_clamping,
        }
    }
}

impl SpringOptions {
    fn to_params(self) -> SpringParams {
        SpringParams::default()
            .with_stiffness(self.stiffness)
            .with_damping(self.damping)
            .with_mass(self.mass)
            .with_overshoot_clamping(self.overshoot_clamping)
    }
}

#[cfg(feature = "config")]
mod easing_name {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use slideup_core::animation::Easing;

    pub fn serialize<S: Serializer>(easing: &Easing, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(easing.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Easing, D::Error> {
        let name = String::deserialize(d)?;
        Easing::from_name(&name).ok_or_else(|| D::Error::custom(format!("unknown easing `{name}`")))
    }
}

// ---------------------------------------------------------------------------
// SheetOptions
// ---------------------------------------------------------------------------

/// Raw sheet options. Validate with [`SheetOptions::validate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SheetOptions {
    #[cfg_attr(feature = "config", serde(alias = "animationType"))]
    pub animation_type: AnimationType,
    /// Resting height of the open sheet, in logical pixels.
    pub height: f64,
    /// Reserved lower bound; validated, otherwise unused.
    #[cfg_attr(feature = "config", serde(alias = "minClosingHeight"))]
    pub min_closing_height: f64,
    /// Open/close transition duration in milliseconds.
    #[cfg_attr(feature = "config", serde(alias = "duration"))]
    pub duration_ms: f64,
    #[cfg_attr(feature = "config", serde(alias = "closeOnDragDown"))]
    pub close_on_drag_down: bool,
    #[cfg_attr(feature = "config", serde(alias = "closeOnPressMask"))]
    pub close_on_press_mask: bool,
    #[cfg_attr(feature = "config", serde(alias = "closeOnPressBack"))]
    pub close_on_press_back: bool,
    #[cfg_attr(feature = "config", serde(alias = "customStyles"))]
    pub custom_styles: CustomStyles,
    #[cfg_attr(feature = "config", serde(with = "easing_name"))]
    pub easing: Easing,
    pub drag_area: DragArea,
    /// Drag release closes when displacement exceeds `height / release_divisor`.
    pub release_divisor: f64,
    pub spring: SpringOptions,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            animation_type: AnimationType::Fade,
            height: DEFAULT_HEIGHT,
            min_closing_height: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
            close_on_drag_down: true,
            close_on_press_mask: true,
            close_on_press_back: true,
            custom_styles: CustomStyles::default(),
            easing: Easing::Standard,
            drag_area: DragArea::WholeSheet,
            release_divisor: DEFAULT_RELEASE_DIVISOR,
            spring: SpringOptions::default(),
        }
    }
}

impl SheetOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn animation_type(mut self, animation_type: AnimationType) -> Self {
        self.animation_type = animation_type;
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn min_closing_height(mut self, min_closing_height: f64) -> Self {
        self.min_closing_height = min_closing_height;
        self
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn close_on_drag_down(mut self, close: bool) -> Self {
        self.close_on_drag_down = close;
        self
    }

    #[must_use]
    pub fn close_on_press_mask(mut self, close: bool) -> Self {
        self.close_on_press_mask = close;
        self
    }

    #[must_use]
    pub fn close_on_press_back(mut self, close: bool) -> Self {
        self.close_on_press_back = close;
        self
    }

    #[must_use]
    pub fn custom_styles(mut self, styles: CustomStyles) -> Self {
        self.custom_styles = styles;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn drag_area(mut self, area: DragArea) -> Self {
        self.drag_area = area;
        self
    }

    #[must_use]
    pub fn release_divisor(mut self, divisor: f64) -> Self {
        self.release_divisor = divisor;
        self
    }

    #[must_use]
    pub fn spring(mut self, spring: SpringOptions) -> Self {
        self.spring = spring;
        self
    }

    fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NonFinite { field, value })
        }
    }

    /// Validate into an immutable [`SheetConfig`].
    pub fn validate(self) -> Result<SheetConfig, ConfigError> {
        Self::check_finite("height", self.height)?;
        Self::check_finite("min_closing_height", self.min_closing_height)?;
        Self::check_finite("duration_ms", self.duration_ms)?;
        Self::check_finite("release_divisor", self.release_divisor)?;
        Self::check_finite("spring.stiffness", self.spring.stiffness)?;
        Self::check_finite("spring.damping", self.spring.damping)?;
        Self::check_finite("spring.mass", self.spring.mass)?;

        if self.height <= 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if self.duration_ms < 0.0 {
            return Err(ConfigError::NegativeDuration(self.duration_ms));
        }
        if !(0.0..=self.height).contains(&self.min_closing_height) {
            return Err(ConfigError::InvalidMinClosingHeight {
                min_closing_height: self.min_closing_height,
                height: self.height,
            });
        }
        if self.release_divisor <= 0.0 {
            return Err(ConfigError::InvalidReleaseDivisor(self.release_divisor));
        }

        let nanos = (self.duration_ms * 1_000_000.0).round();
        if nanos >= u64::MAX as f64 {
            return Err(ConfigError::DurationOverflow(self.duration_ms));
        }

        Ok(SheetConfig {
            animation_type: self.animation_type,
            height: self.height,
            min_closing_height: self.min_closing_height,
            duration: Duration::from_nanos(nanos as u64),
            close_on_drag_down: self.close_on_drag_down,
            close_on_press_mask: self.close_on_press_mask,
            close_on_press_back: self.close_on_press_back,
            custom_styles: self.custom_styles,
            easing: self.easing,
            drag_area: self.drag_area,
            drag: DragConfig {
                release_divisor: self.release_divisor,
            },
            spring: self.spring.to_params(),
        })
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        toml::from_str(s).map_err(LoadError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LoadError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        serde_json::from_str(s).map_err(LoadError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LoadError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl TryFrom<SheetOptions> for SheetConfig {
    type Error = ConfigError;

    fn try_from(options: SheetOptions) -> Result<Self, Self::Error> {
        options.validate()
    }
}

// ---------------------------------------------------------------------------
// SheetConfig
// ---------------------------------------------------------------------------

/// Validated, immutable sheet configuration.
///
/// Invariants: `height > 0`, `0 <= min_closing_height <= height`, drag
/// release divisor `> 0`, all values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    animation_type: AnimationType,
    height: f64,
    min_closing_height: f64,
    duration: Duration,
    close_on_drag_down: bool,
    close_on_press_mask: bool,
    close_on_press_back: bool,
    custom_styles: CustomStyles,
    easing: Easing,
    drag_area: DragArea,
    drag: DragConfig,
    spring: SpringParams,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            animation_type: AnimationType::Fade,
            height: DEFAULT_HEIGHT,
            min_closing_height: 0.0,
            duration: Duration::from_millis(300),
            close_on_drag_down: true,
            close_on_press_mask: true,
            close_on_press_back: true,
            custom_styles: CustomStyles::default(),
            easing: Easing::Standard,
            drag_area: DragArea::WholeSheet,
            drag: DragConfig::default(),
            spring: SpringParams::default(),
        }
    }
}

impl SheetConfig {
    #[inline]
    #[must_use]
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    /// Resting height; also the hidden offset.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn min_closing_height(&self) -> f64 {
        self.min_closing_height
    }

    /// Open/close transition duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn close_on_drag_down(&self) -> bool {
        self.close_on_drag_down
    }

    #[inline]
    #[must_use]
    pub fn close_on_press_mask(&self) -> bool {
        self.close_on_press_mask
    }

    #[inline]
    #[must_use]
    pub fn close_on_press_back(&self) -> bool {
        self.close_on_press_back
    }

    #[inline]
    #[must_use]
    pub fn custom_styles(&self) -> &CustomStyles {
        &self.custom_styles
    }

    #[inline]
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[inline]
    #[must_use]
    pub fn drag_area(&self) -> DragArea {
        self.drag_area
    }

    #[inline]
    #[must_use]
    pub fn drag(&self) -> &DragConfig {
        &self.drag
    }

    #[inline]
    #[must_use]
    pub fn spring(&self) -> &SpringParams {
        &self.spring
    }

    /// Drag displacement past which a release closes the sheet.
    #[inline]
    #[must_use]
    pub fn release_threshold(&self) -> f64 {
        self.drag.threshold(self.height)
    }

    /// Parse and validate a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(SheetOptions::from_toml_str(s)?.validate()?)
    }

    /// Parse and validate a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(SheetOptions::from_toml_file(path)?.validate()?)
    }

    /// Parse and validate a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        Ok(SheetOptions::from_json_str(s)?.validate()?)
    }

    /// Parse and validate a JSON file.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(SheetOptions::from_json_file(path)?.validate()?)
    }
}

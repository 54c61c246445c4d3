//! Snap behavior configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the section-navigation controller
///
/// All fields have defaults; embedding pages override what they need,
/// either in code or from a TOML document via [`SnapConfig::from_toml_str`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Minimum accumulated displacement for a burst to count as
    /// directional; at or below it the controller snaps back to the
    /// closest section (default: 50.0)
    pub threshold: f32,
    /// Quiet interval after the last observation before a burst settles,
    /// in milliseconds (default: 150)
    pub debounce_ms: u64,
    /// Fixed upper bound on the host's animated move, in milliseconds;
    /// the guard stays up for exactly this long (default: 600)
    pub snap_duration_ms: u64,
    /// Restrict snapping to narrow viewports (default: true)
    pub mobile_only: bool,
    /// Viewport width below which the narrow mode is active, in logical
    /// units; the comparison is strict (default: 1024.0)
    pub breakpoint: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            debounce_ms: 150,
            snap_duration_ms: 600,
            mobile_only: true,
            breakpoint: 1024.0,
        }
    }
}

impl SnapConfig {
    /// Create config with the mobile-only restriction disabled
    /// (snapping active at any viewport width)
    pub fn unrestricted() -> Self {
        Self {
            mobile_only: false,
            ..Default::default()
        }
    }

    /// Create config that reacts to slighter gestures (lower threshold,
    /// shorter quiet interval)
    pub fn eager() -> Self {
        Self {
            threshold: 30.0,
            debounce_ms: 100,
            ..Default::default()
        }
    }

    /// Create config that waits out longer pauses and demands a more
    /// deliberate gesture before moving
    pub fn relaxed() -> Self {
        Self {
            threshold: 80.0,
            debounce_ms: 250,
            ..Default::default()
        }
    }

    /// Quiet interval as a [`Duration`]
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Snap window as a [`Duration`]
    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }

    /// Parse a TOML document and validate the result.
    ///
    /// ```rust
    /// use pagesnap_core::SnapConfig;
    ///
    /// let config = SnapConfig::from_toml_str("threshold = 80.0").unwrap();
    /// assert_eq!(config.threshold, 80.0);
    /// assert_eq!(config.debounce_ms, 150); // defaults fill the rest
    /// ```
    pub fn from_toml_str(doc: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(doc)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values for the handful of genuinely broken inputs.
    ///
    /// Runtime inputs to the controller are absorbed as no-ops, but a
    /// non-finite threshold or a zero-length timer window would make every
    /// burst misbehave, so configuration is the one place that rejects.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "threshold",
                reason: "must be finite and non-negative",
            });
        }
        if !self.breakpoint.is_finite() || self.breakpoint <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "breakpoint",
                reason: "must be finite and positive",
            });
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "debounce_ms",
                reason: "must be non-zero",
            });
        }
        if self.snap_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "snap_duration_ms",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }
}

/// Errors surfaced by the configuration layer
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("malformed config document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value is outside its usable range
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

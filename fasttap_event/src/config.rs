// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture and suppression thresholds.
//!
//! All distances are in logical pixels and are compared per axis, not as a Euclidean
//! distance. Times are in milliseconds.
//!
//! ```
//! use fasttap_event::{ConfigError, TapConfig};
//!
//! let config = TapConfig::default().with_drag_threshold(6.0).validate().unwrap();
//! assert_eq!(config.drag_threshold, 6.0);
//!
//! let err = TapConfig::default().with_suppress_window_ms(0).validate();
//! assert_eq!(err, Err(ConfigError::EmptySuppressWindow));
//! ```

/// Per-axis movement beyond which a contact is a drag rather than a tap.
///
/// A finger rarely stays perfectly still while tapping; anything at or under this
/// distance still counts as a tap.
pub const DRAG_THRESHOLD: f64 = 10.0;

/// Per-axis distance under which a click is treated as the ghost of a recent tap.
///
/// Platforms place the synthetic click slightly off the original touch point.
pub const SPACE_THRESHOLD: f64 = 30.0;

/// How long a reported tap keeps suppressing clicks.
///
/// Must exceed the platform's worst-case delay between a tap and its synthetic click
/// (typically around 300ms) with margin; too short lets ghost clicks through.
pub const SUPPRESS_WINDOW_MS: u64 = 1000;

/// Invalid [`TapConfig`] values.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Drag threshold is negative, NaN, or infinite.
    #[error("drag threshold must be finite and non-negative, got {0}")]
    InvalidDragThreshold(f64),
    /// Space threshold is negative, NaN, or infinite.
    #[error("space threshold must be finite and non-negative, got {0}")]
    InvalidSpaceThreshold(f64),
    /// Suppression window of zero would make every report inert immediately.
    #[error("suppression window must be non-zero")]
    EmptySuppressWindow,
}

/// Thresholds shared by gesture detection and ghost-click suppression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapConfig {
    /// See [`DRAG_THRESHOLD`].
    pub drag_threshold: f64,
    /// See [`SPACE_THRESHOLD`].
    pub space_threshold: f64,
    /// See [`SUPPRESS_WINDOW_MS`].
    pub suppress_window_ms: u64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            space_threshold: SPACE_THRESHOLD,
            suppress_window_ms: SUPPRESS_WINDOW_MS,
        }
    }
}

impl TapConfig {
    /// Override the drag threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, px: f64) -> Self {
        self.drag_threshold = px;
        self
    }

    /// Override the space threshold.
    #[must_use]
    pub fn with_space_threshold(mut self, px: f64) -> Self {
        self.space_threshold = px;
        self
    }

    /// Override the suppression window.
    #[must_use]
    pub fn with_suppress_window_ms(mut self, ms: u64) -> Self {
        self.suppress_window_ms = ms;
        self
    }

    /// Check every field, returning the config unchanged when it is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !is_valid_distance(self.drag_threshold) {
            return Err(ConfigError::InvalidDragThreshold(self.drag_threshold));
        }
        if !is_valid_distance(self.space_threshold) {
            return Err(ConfigError::InvalidSpaceThreshold(self.space_threshold));
        }
        if self.suppress_window_ms == 0 {
            return Err(ConfigError::EmptySuppressWindow);
        }
        Ok(self)
    }
}

fn is_valid_distance(px: f64) -> bool {
    px.is_finite() && px >= 0.0
}

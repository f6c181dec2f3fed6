//! Session configuration.
//!
//! Every field has a default, so an empty JSON
//! object is a valid configuration:
//!
//! | Field              | Default                |
//! |--------------------|------------------------|
//! | `privacy`          | `blur`                 |
//! | `share`            | `radius` of 3 miles    |
//! | `refresh_policy`   | `refilter_cached_fix`  |
//! | `fix_timeout_secs` | 30                     |
//! | `overlays`         | relief on at 0.6       |
//! | `map`              | zoom 11, `#111827` pin |
//!
//! # Example
//!
//! ```
//! use waypoint_core::config::WaypointConfig;
//! use waypoint_core::location::ShareMode;
//!
//! let config = WaypointConfig::from_json(r#"{"share":"point"}"#).unwrap();
//! assert_eq!(config.share, ShareMode::Point);
//! assert_eq!(config.fix_timeout_secs, 30);
//! ```

mod error;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

use crate::location::{PrivacyMode, ShareMode};
use crate::map::{MapOptions, OverlaySet, MAX_ZOOM};

/// Default time to wait for a device fix before treating it as failed.
pub const DEFAULT_FIX_TIMEOUT_SECS: u64 = 30;

/// What happens to the canonical position when the privacy mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Re-filter the cached raw fix without querying the device.
    ///
    /// Falls back to a device query when no fix has been cached yet.
    #[default]
    RefilterCachedFix,
    /// Discard the previous fix and query the device again.
    Requery,
}

/// Settings for a Waypoint session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Initial privacy mode.
    pub privacy: PrivacyMode,

    /// Initial share mode.
    pub share: ShareMode,

    /// Behaviour on privacy mode changes.
    pub refresh_policy: RefreshPolicy,

    /// Seconds to wait for a device fix.
    pub fix_timeout_secs: u64,

    /// Initial overlay state.
    pub overlays: OverlaySet,

    /// Renderer options.
    pub map: MapOptions,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            privacy: PrivacyMode::default(),
            share: ShareMode::default(),
            refresh_policy: RefreshPolicy::default(),
            fix_timeout_secs: DEFAULT_FIX_TIMEOUT_SECS,
            overlays: OverlaySet::default(),
            map: MapOptions::default(),
        }
    }
}

impl WaypointConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, or the first
    /// validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every field for values the session cannot use.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        validate_share_mode(self.share)?;
        if self.fix_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if !(0.0..=f64::from(MAX_ZOOM)).contains(&self.map.zoom) {
            return Err(ConfigError::InvalidZoom(self.map.zoom));
        }
        self.overlays.validate()
    }

    /// Fix timeout as a [`Duration`].
    #[must_use]
    pub const fn fix_timeout(&self) -> Duration {
        Duration::from_secs(self.fix_timeout_secs)
    }
}

/// Rejects radius modes with a negative or non-finite radius.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRadius`].
pub fn validate_share_mode(mode: ShareMode) -> Result<()> {
    match mode {
        ShareMode::Radius { miles } if !miles.is_finite() || miles < 0.0 => {
            Err(ConfigError::InvalidRadius(miles))
        }
        _ => Ok(()),
    }
}

//! Error types for configuration and user-supplied settings.

use thiserror::Error;

/// Error type for invalid settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Share radius is negative or not finite.
    #[error("Invalid share radius: {0} miles")]
    InvalidRadius(f64),

    /// Overlay opacity is NaN or outside `[0, 1]`.
    #[error("Invalid overlay opacity: {0}")]
    InvalidOpacity(f64),

    /// Fix timeout of zero seconds.
    #[error("Invalid fix timeout: must be at least one second")]
    InvalidTimeout,

    /// Zoom level outside the renderer's range.
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(f64),

    /// Configuration JSON could not be parsed or written.
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

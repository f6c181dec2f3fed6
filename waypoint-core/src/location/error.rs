//! Error types for location acquisition.
//!
//! Both variants are terminal for a single acquisition attempt and never
//! fatal to the session: the session records them and renders the message
//! in place of the coordinate display.

use thiserror::Error;

/// Errors a platform location service can report for a one-shot fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The platform offers no location capability. Not retried.
    #[error("Geolocation not supported")]
    Unsupported,

    /// The user declined, the fix failed or timed out.
    #[error("GPS access denied or unavailable")]
    Denied,
}

/// Result type for location acquisition.
pub type LocationResult<T> = Result<T, LocationError>;

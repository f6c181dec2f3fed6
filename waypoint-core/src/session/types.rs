//! Types exchanged with the session.

use serde::{Deserialize, Serialize};

use crate::location::{Coordinate, LocationError, PrivacyMode, ShareMode, SharePreview};
use crate::map::OverlayId;

/// Handle for one in-flight acquisition.
///
/// Ids increase monotonically within a session. Only the most recently
/// issued request may complete; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixRequest(u64);

impl FixRequest {
    /// Rebuilds a request handle from an id passed across an FFI boundary.
    #[must_use]
    pub const fn from_id(id: u64) -> Self {
        Self(id)
    }

    /// The request id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A change of derived session state, emitted to dependents in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The privacy mode was switched.
    PrivacyChanged(PrivacyMode),
    /// The share mode was switched.
    ShareModeChanged(ShareMode),
    /// A new canonical position was published.
    CanonicalChanged(Coordinate),
    /// The share preview was recomputed.
    PreviewChanged(SharePreview),
    /// An acquisition attempt failed.
    LocationFailed(LocationError),
    /// An overlay's visibility or opacity changed.
    OverlayChanged(OverlayId),
}

/// Result of completing an acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum FixOutcome {
    /// The result was applied to the session.
    Applied(Vec<SessionEvent>),
    /// The request was superseded; the result was ignored.
    Stale,
}

impl FixOutcome {
    /// Events produced by the completion (empty when stale).
    #[must_use]
    pub fn into_events(self) -> Vec<SessionEvent> {
        match self {
            Self::Applied(events) => events,
            Self::Stale => Vec::new(),
        }
    }

    /// Returns true if the result was ignored.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Result of switching the privacy mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrivacyChange {
    /// Events produced synchronously.
    pub events: Vec<SessionEvent>,
    /// Set when a new device fix must be requested to honour the change.
    pub fix_request: Option<FixRequest>,
}

/// What the location status pill shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationStatus {
    /// No position and no error yet.
    Locating,
    /// A canonical position exists.
    Located(Coordinate),
    /// No position; the last attempt failed.
    Failed(LocationError),
}

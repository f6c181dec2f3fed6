//! Session state and its recomputation contract.
//!
//! A session is one run of the UI: it starts with no position, acquires a
//! fix, and keeps canonical position, share preview and overlay state in
//! sync as the user changes modes.
//!
//! # Acquisition sequencing
//!
//! Every acquisition is tagged with a monotonically increasing
//! [`FixRequest`]. Only the most recent request may complete; results for
//! superseded requests are dropped. This makes overlapping acquisitions
//! (e.g. rapid privacy toggling with [`RefreshPolicy::Requery`]) resolve
//! deterministically instead of last-callback-wins.
//!
//! [`RefreshPolicy::Requery`]: crate::config::RefreshPolicy::Requery

mod manager;
mod status;
mod types;

pub use manager::Session;
pub use status::{format_coordinate, format_preview, LOCATING_TEXT, NO_PREVIEW_TEXT};
pub use types::{FixOutcome, FixRequest, LocationStatus, PrivacyChange, SessionEvent};

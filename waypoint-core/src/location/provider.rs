//! Platform location service seam.
//!
//! The device location capability lives outside this crate (browser
//! geolocation, OS location manager, ...). It is consumed through
//! [`LocationProvider`], which resolves exactly once per request. There is
//! no continuous tracking and no cancellation.

use std::future::Future;

use super::error::LocationResult;
use super::types::Coordinate;

/// One-shot source of raw device fixes.
///
/// # Example
///
/// ```
/// use std::future::{ready, Future};
/// use waypoint_core::location::{Coordinate, LocationProvider, LocationResult};
///
/// struct Fixed(Coordinate);
///
/// impl LocationProvider for Fixed {
///     fn request_fix(&self) -> impl Future<Output = LocationResult<Coordinate>> + Send {
///         ready(Ok(self.0))
///     }
/// }
/// ```
pub trait LocationProvider {
    /// Requests a single position fix from the platform.
    ///
    /// # Errors
    ///
    /// Resolves to [`LocationError::Unsupported`] if the platform has no
    /// location capability, or [`LocationError::Denied`] if the user
    /// declined or the fix failed.
    ///
    /// [`LocationError::Unsupported`]: super::LocationError::Unsupported
    /// [`LocationError::Denied`]: super::LocationError::Denied
    fn request_fix(&self) -> impl Future<Output = LocationResult<Coordinate>> + Send;
}

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedProvider;

#[cfg(any(test, feature = "test-utils"))]
mod scripted {
    use std::collections::VecDeque;
    use std::future::{ready, Future};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::LocationProvider;
    use crate::location::error::{LocationError, LocationResult};
    use crate::location::types::Coordinate;

    /// Provider that replays a fixed script of results.
    ///
    /// Once the script is exhausted every request resolves to
    /// [`LocationError::Denied`]. Counts requests so tests can assert
    /// whether the device was queried.
    ///
    /// # Warning
    ///
    /// Test utility only.
    #[derive(Debug, Default)]
    pub struct ScriptedProvider {
        script: Mutex<VecDeque<LocationResult<Coordinate>>>,
        requests: AtomicUsize,
    }

    impl ScriptedProvider {
        /// Creates a provider that replays `results` in order.
        #[must_use]
        pub fn new(results: impl IntoIterator<Item = LocationResult<Coordinate>>) -> Self {
            Self {
                script: Mutex::new(results.into_iter().collect()),
                requests: AtomicUsize::new(0),
            }
        }

        /// Creates a provider that always returns `coordinate`.
        #[must_use]
        pub fn always(coordinate: Coordinate, times: usize) -> Self {
            Self::new(std::iter::repeat(Ok(coordinate)).take(times))
        }

        /// Appends a result to the end of the script.
        pub fn push(&self, result: LocationResult<Coordinate>) {
            if let Ok(mut script) = self.script.lock() {
                script.push_back(result);
            }
        }

        /// Number of fixes requested so far.
        #[must_use]
        pub fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl LocationProvider for ScriptedProvider {
        fn request_fix(&self) -> impl Future<Output = LocationResult<Coordinate>> + Send {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .ok()
                .and_then(|mut script| script.pop_front())
                .unwrap_or(Err(LocationError::Denied));
            ready(next)
        }
    }
}

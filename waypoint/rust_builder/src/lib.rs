//! Flutter-Rust bridge wrapper for waypoint-core.
//!
//! This crate serves as a thin wrapper that re-exports `waypoint-core` for
//! integration with the Flutter build system via Cargokit. The FFI surface
//! lives in [`api`].

pub mod api;

pub use waypoint_core::*;

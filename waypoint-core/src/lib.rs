//! Waypoint Core Library
//!
//! Core functionality for Waypoint - a privacy-aware location map.
//! This crate turns a one-shot device fix into a privacy-filtered canonical
//! position, derives an approximate share preview from it, and drives a map
//! renderer through a narrow trait.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod config;
pub mod location;
pub mod map;
pub mod session;

pub use api::Waypoint;

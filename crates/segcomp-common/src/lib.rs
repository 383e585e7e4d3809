//! # segcomp-common
//!
//! Shared types for segcomp: geographic coordinates, named routes and the
//! great-circle distance used everywhere distances are accumulated.

mod geo;
mod route;

pub use geo::{haversine_km, haversine_m, Coordinate, EARTH_RADIUS_KM};
pub use route::{Route, RouteSet};

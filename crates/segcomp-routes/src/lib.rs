//! # segcomp-routes
//!
//! Route acquisition for segcomp. A route comes either from a remote segment,
//! whose geometry arrives as an encoded polyline, or from the first segment
//! of the first track in a local GPX file.
//!
//! ```no_run
//! use segcomp_routes::{parse_identifier_list, RouteLoader, DEFAULT_API_BASE_URL};
//!
//! let ids = parse_identifier_list("638886, 7506566, ride.gpx");
//! let loader = RouteLoader::connect(DEFAULT_API_BASE_URL, Some("token"))?;
//! let report = loader.load(&ids);
//! for route in &report.routes {
//!     println!("{}: {} points", route.name, route.len());
//! }
//! # Ok::<(), segcomp_routes::RouteError>(())
//! ```

mod error;
mod identifier;
mod loader;
mod polyline;
mod segment;
mod track;

pub use error::RouteError;
pub use identifier::{parse_identifier_list, RouteIdentifier};
pub use loader::{LoadReport, RouteLoader};
pub use polyline::decode_polyline;
pub use segment::{
    parse_segment, SegmentClient, SegmentMap, SegmentResponse, SegmentSource,
    DEFAULT_API_BASE_URL, REQUEST_TIMEOUT,
};
pub use track::{load_gpx_route, read_gpx_route};

/// Result type for route acquisition.
pub type Result<T> = std::result::Result<T, RouteError>;

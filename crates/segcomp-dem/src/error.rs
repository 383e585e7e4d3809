//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when working with DEM data.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a file or the tiles directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// The tile file exists but its contents are not a usable sample grid.
    #[error("Invalid tile {path}: {reason}")]
    InvalidTile {
        /// Path of the offending file.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Coordinate is outside the bounds of the tile.
    #[error("Coordinate ({lat}, {lon}) is outside tile bounds ({min_lat}-{max_lat}, {min_lon}-{max_lon})")]
    OutOfBounds {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
        /// Tile minimum latitude.
        min_lat: f64,
        /// Tile maximum latitude.
        max_lat: f64,
        /// Tile minimum longitude.
        min_lon: f64,
        /// Tile maximum longitude.
        max_lon: f64,
    },

    /// The tile covering a coordinate is not present in the tiles directory.
    #[error("Elevation tile {name} not found")]
    TileNotFound {
        /// Expected tile file name, e.g. `N51E003.hgt`.
        name: String,
    },

    /// Invalid tile filename - cannot parse coordinates.
    #[error("Invalid tile filename: {0}")]
    InvalidFilename(String),

    /// Cache lock was poisoned (a thread panicked while holding the lock).
    #[error("Tile cache lock was poisoned")]
    CacheLockPoisoned,

    /// No data value encountered.
    #[error("No elevation data at coordinate ({lat}, {lon})")]
    NoData {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },
}

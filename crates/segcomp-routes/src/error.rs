//! Error types for route acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The segment API answered with a non-success status.
    #[error("Fetching segment {id} failed with HTTP status {status}")]
    FetchFailed {
        /// Segment identifier.
        id: String,
        /// HTTP status code.
        status: u16,
    },

    /// HTTP transport error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The segment response could not be understood.
    #[error("Invalid segment response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// A remote segment was requested without an access token.
    #[error("Segment {id} needs an access token")]
    MissingToken {
        /// Segment identifier.
        id: String,
    },

    /// Encoded polyline could not be decoded.
    #[error("Malformed polyline: {0}")]
    MalformedPolyline(String),

    /// Track file lacks the expected track/segment structure.
    #[error("Malformed track file {path}: {reason}")]
    MalformedTrack {
        /// Track file path.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// I/O error while reading a track file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

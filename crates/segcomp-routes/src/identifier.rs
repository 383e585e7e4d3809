//! Classification of user-supplied route identifiers.

use std::fmt;
use std::path::PathBuf;

/// Where a route comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteIdentifier {
    /// Remote segment, fetched from the segment API.
    Segment(String),
    /// Local GPX track file.
    TrackFile(PathBuf),
}

impl RouteIdentifier {
    /// Classify one identifier. Anything whose last `.`-separated component
    /// is `gpx` (any case) is a track file; everything else is a segment id.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.rsplit('.').next() {
            Some(ext) if ext.eq_ignore_ascii_case("gpx") => {
                RouteIdentifier::TrackFile(PathBuf::from(s))
            }
            _ => RouteIdentifier::Segment(s.to_string()),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, RouteIdentifier::Segment(_))
    }
}

impl fmt::Display for RouteIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteIdentifier::Segment(id) => write!(f, "{}", id),
            RouteIdentifier::TrackFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Split a `", "`-separated list into identifiers, dropping empty entries.
pub fn parse_identifier_list(input: &str) -> Vec<RouteIdentifier> {
    input
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RouteIdentifier::parse)
        .collect()
}

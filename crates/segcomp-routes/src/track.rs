//! Routes from GPX track files.

use crate::{Result, RouteError};
use segcomp_common::{Coordinate, Route};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Load the first segment of the first track in a GPX file.
///
/// The route is named after the file's base name.
pub fn load_gpx_route(path: impl AsRef<Path>) -> Result<Route> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_gpx_route(BufReader::new(file), name, path)
}

/// Parse GPX from `reader`. `path` is only used in error messages.
pub fn read_gpx_route<R: Read>(reader: R, name: String, path: &Path) -> Result<Route> {
    let malformed = |reason: String| RouteError::MalformedTrack {
        path: path.to_path_buf(),
        reason,
    };

    let doc = gpx::read(reader).map_err(|e| malformed(e.to_string()))?;
    let track = doc
        .tracks
        .first()
        .ok_or_else(|| malformed("no track".to_string()))?;
    let segment = track
        .segments
        .first()
        .ok_or_else(|| malformed("track has no segment".to_string()))?;
    if segment.points.is_empty() {
        return Err(malformed("segment has no points".to_string()));
    }

    let points: Vec<Coordinate> = segment
        .points
        .iter()
        .map(|waypoint| {
            let p = waypoint.point();
            Coordinate::new(p.y(), p.x())
        })
        .collect();
    debug!("Read {} track points from {}", points.len(), path.display());
    Ok(Route::new(name, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="segcomp-test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning ride</name>
    <trkseg>
      <trkpt lat="51.0500" lon="3.7200"><ele>12.0</ele></trkpt>
      <trkpt lat="51.0510" lon="3.7210"><ele>14.0</ele></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="52.0000" lon="4.0000"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const NO_TRACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="segcomp-test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="51.0" lon="3.0"></wpt>
</gpx>"#;

    #[test]
    fn test_first_segment_only() {
        let route =
            read_gpx_route(TWO_SEGMENTS.as_bytes(), "ride.gpx".to_string(), Path::new("ride.gpx"))
                .unwrap();
        assert_eq!(route.name, "ride.gpx");
        assert_eq!(route.points.len(), 2);
        assert_eq!(route.points[0], Coordinate::new(51.05, 3.72));
        assert_eq!(route.points[1].lon, 3.721);
    }

    #[test]
    fn test_no_track_is_malformed() {
        let err = read_gpx_route(NO_TRACK.as_bytes(), "x".to_string(), Path::new("x.gpx"))
            .unwrap_err();
        assert!(matches!(err, RouteError::MalformedTrack { .. }));
    }

    #[test]
    fn test_not_xml_is_malformed() {
        let err = read_gpx_route(&b"not a track"[..], "x".to_string(), Path::new("x.gpx"))
            .unwrap_err();
        assert!(matches!(err, RouteError::MalformedTrack { .. }));
    }
}

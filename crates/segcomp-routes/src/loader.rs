//! Loading a list of identifiers into a name-unique route set.

use crate::identifier::RouteIdentifier;
use crate::segment::{SegmentClient, SegmentSource};
use crate::track::load_gpx_route;
use crate::{Result, RouteError};
use segcomp_common::{Route, RouteSet};
use tracing::{info, warn};

/// Routes that loaded, plus the identifiers that did not.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub routes: RouteSet,
    pub failures: Vec<(RouteIdentifier, RouteError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads routes from track files and, when a source is available, remote
/// segments.
#[derive(Debug)]
pub struct RouteLoader<S = SegmentClient> {
    segments: Option<S>,
}

impl RouteLoader<SegmentClient> {
    /// Loader for the segment API at `base_url`. Without a token only track
    /// files can be loaded.
    pub fn connect(base_url: &str, access_token: Option<&str>) -> Result<Self> {
        let segments = access_token
            .map(|token| SegmentClient::with_base_url(base_url, token))
            .transpose()?;
        Ok(Self { segments })
    }

    /// Loader that only reads track files.
    pub fn offline() -> Self {
        Self { segments: None }
    }
}

impl<S: SegmentSource> RouteLoader<S> {
    /// Loader fetching remote segments from `source`.
    pub fn with_source(source: S) -> Self {
        Self {
            segments: Some(source),
        }
    }

    /// Load one identifier.
    pub fn load_one(&self, identifier: &RouteIdentifier) -> Result<Route> {
        match identifier {
            RouteIdentifier::TrackFile(path) => load_gpx_route(path),
            RouteIdentifier::Segment(id) => match &self.segments {
                Some(source) => source.fetch_segment(id),
                None => Err(RouteError::MissingToken { id: id.clone() }),
            },
        }
    }

    /// Load every identifier in order. Failures are logged and collected,
    /// and loading carries on with the next identifier.
    pub fn load(&self, identifiers: &[RouteIdentifier]) -> LoadReport {
        let mut report = LoadReport::default();
        for identifier in identifiers {
            info!("Loading route {}", identifier);
            match self.load_one(identifier) {
                Ok(route) => {
                    let name = report.routes.insert(route);
                    info!("Loaded '{}'", name);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", identifier, e);
                    report.failures.push((identifier.clone(), e));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segcomp_common::Coordinate;

    /// Serves every id as a one-point route named "Climb", except "404".
    struct FakeApi;

    impl SegmentSource for FakeApi {
        fn fetch_segment(&self, id: &str) -> Result<Route> {
            if id == "404" {
                return Err(RouteError::FetchFailed {
                    id: id.to_string(),
                    status: 404,
                });
            }
            Ok(Route::new("Climb", vec![Coordinate::new(51.0, 3.0)]))
        }
    }

    fn segment(id: &str) -> RouteIdentifier {
        RouteIdentifier::Segment(id.to_string())
    }

    #[test]
    fn test_failures_do_not_stop_loading() {
        let loader = RouteLoader::with_source(FakeApi);
        let report = loader.load(&[segment("1"), segment("404"), segment("2")]);
        assert_eq!(report.routes.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].1,
            RouteError::FetchFailed { status: 404, .. }
        ));
        let names: Vec<&str> = report.routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Climb", "Climb (2)"]);
    }

    #[test]
    fn test_segment_without_token() {
        let loader = RouteLoader::offline();
        let report = loader.load(&[segment("638886")]);
        assert!(report.routes.is_empty());
        assert!(matches!(
            report.failures[0].1,
            RouteError::MissingToken { ref id } if id == "638886"
        ));
    }

    #[test]
    fn test_missing_track_file_is_reported() {
        let loader = RouteLoader::with_source(FakeApi);
        let report = loader.load(&[RouteIdentifier::parse("/nonexistent/ride.gpx")]);
        assert!(!report.is_complete());
        assert!(matches!(report.failures[0].1, RouteError::Io(_)));
    }
}

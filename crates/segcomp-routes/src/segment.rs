//! Client for the remote segment API.

use crate::polyline::decode_polyline;
use crate::{Result, RouteError};
use segcomp_common::Route;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default API root.
pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Request timeout for segment lookups.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn a segment identifier into a route.
pub trait SegmentSource {
    fn fetch_segment(&self, id: &str) -> Result<Route>;
}

/// The part of a segment response segcomp uses.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentResponse {
    pub name: String,
    pub map: SegmentMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentMap {
    pub polyline: String,
}

impl SegmentResponse {
    /// Decode the segment's polyline into a route.
    pub fn into_route(self) -> Result<Route> {
        let points = decode_polyline(&self.map.polyline)?;
        Ok(Route::new(self.name, points))
    }
}

/// Parse a segment response body into a route.
pub fn parse_segment(body: &str) -> Result<Route> {
    serde_json::from_str::<SegmentResponse>(body)?.into_route()
}

/// Blocking HTTP client for segment lookups.
pub struct SegmentClient {
    base_url: String,
    access_token: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for SegmentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SegmentClient {
    /// Create a client against the default API root.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL, access_token)
    }

    /// Create a client against a specific API root.
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(base_url, access_token, client))
    }

    /// Create a client around a preconfigured HTTP client.
    pub fn with_http_client(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        client: reqwest::blocking::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client,
        }
    }

    /// URL of a segment, without the token.
    pub fn segment_url(&self, id: &str) -> String {
        format!("{}/segments/{}", self.base_url, id)
    }

    /// Fetch one segment and decode its geometry.
    pub fn fetch(&self, id: &str) -> Result<Route> {
        let url = self.segment_url(id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()?;

        let status = response.status();
        info!("Segment {}: status code {}", id, status.as_u16());
        if !status.is_success() {
            return Err(RouteError::FetchFailed {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<SegmentResponse>()?.into_route()
    }
}

impl SegmentSource for SegmentClient {
    fn fetch_segment(&self, id: &str) -> Result<Route> {
        self.fetch(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segment_body() {
        let body = r#"{
            "id": 638886,
            "name": "Old La Honda",
            "distance": 5433.3,
            "map": { "id": "s638886", "polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" }
        }"#;
        let route = parse_segment(body).unwrap();
        assert_eq!(route.name, "Old La Honda");
        assert_eq!(route.points.len(), 3);
    }

    #[test]
    fn test_parse_segment_missing_map() {
        assert!(matches!(
            parse_segment(r#"{"name": "x"}"#),
            Err(RouteError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_segment_url() {
        let client = SegmentClient::with_base_url("http://localhost:9/api/", "t").unwrap();
        assert_eq!(client.segment_url("42"), "http://localhost:9/api/segments/42");
    }
}

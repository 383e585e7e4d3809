//! Elevation profiles aligned with a route's points.

use crate::distance::cumulative_distance_m;
use crate::smooth::smooth;
use crate::{ProfileError, Result};
use segcomp_common::Coordinate;
use segcomp_dem::ElevationProvider;
use tracing::debug;

/// Elevations along a route, aligned 1:1 with its points.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    /// Cumulative distance from the first point, in meters.
    pub distances_m: Vec<f64>,
    /// Elevation sampled at each point.
    pub raw: Vec<f64>,
    /// `raw` after smoothing.
    pub smoothed: Vec<f64>,
}

impl ElevationProfile {
    /// Sample `provider` at every point of a route and smooth the result.
    pub fn from_route<P>(provider: &P, points: &[Coordinate], passes: usize) -> Result<Self>
    where
        P: ElevationProvider + ?Sized,
    {
        if points.is_empty() {
            return Err(ProfileError::EmptyRoute);
        }
        let raw = points
            .iter()
            .map(|p| provider.elevation(p.lat, p.lon))
            .collect::<std::result::Result<Vec<f64>, _>>()?;
        debug!("Sampled {} elevations", raw.len());
        Self::from_samples(cumulative_distance_m(points), raw, passes)
    }

    /// Build a profile from distances and elevations that are already known.
    pub fn from_samples(distances_m: Vec<f64>, raw: Vec<f64>, passes: usize) -> Result<Self> {
        if distances_m.len() != raw.len() {
            return Err(ProfileError::LengthMismatch {
                xs: distances_m.len(),
                ys: raw.len(),
            });
        }
        if raw.is_empty() {
            return Err(ProfileError::EmptyRoute);
        }
        let smoothed = smooth(&raw, passes)?;
        Ok(Self {
            distances_m,
            raw,
            smoothed,
        })
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Total distance covered, in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.distances_m.last().copied().unwrap_or(0.0)
    }

    /// Mean of the unsmoothed elevations.
    pub fn mean_elevation(&self) -> f64 {
        if self.raw.is_empty() {
            return 0.0;
        }
        self.raw.iter().sum::<f64>() / self.raw.len() as f64
    }

    /// Lowest smoothed elevation.
    pub fn min_smoothed(&self) -> f64 {
        self.smoothed.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Highest smoothed elevation.
    pub fn max_smoothed(&self) -> f64 {
        self.smoothed.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Net climb from first to last smoothed sample.
    pub fn net_climb(&self) -> f64 {
        match (self.smoothed.first(), self.smoothed.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segcomp_dem::DemError;

    /// Elevation equal to latitude offset in millidegrees.
    struct Slope;

    impl ElevationProvider for Slope {
        fn elevation(&self, lat: f64, _lon: f64) -> segcomp_dem::Result<f64> {
            Ok((lat - 51.0) * 1000.0)
        }
    }

    struct NoTiles;

    impl ElevationProvider for NoTiles {
        fn elevation(&self, _lat: f64, _lon: f64) -> segcomp_dem::Result<f64> {
            Err(DemError::TileNotFound {
                name: "N51E003.hgt".to_string(),
            })
        }
    }

    fn route(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(51.0 + i as f64 * 0.001, 3.0))
            .collect()
    }

    #[test]
    fn test_profile_aligned_with_points() {
        let points = route(12);
        let profile = ElevationProfile::from_route(&Slope, &points, 5).unwrap();
        assert_eq!(profile.len(), points.len());
        assert_eq!(profile.distances_m.len(), points.len());
        assert_eq!(profile.smoothed.len(), points.len());
        assert_eq!(profile.distances_m[0], 0.0);
        assert!((profile.raw[3] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_tile_propagates() {
        let err = ElevationProfile::from_route(&NoTiles, &route(6), 1).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Elevation(DemError::TileNotFound { .. })
        ));
        // The tile name is reported once, by the source error
        assert_eq!(err.to_string(), "Elevation lookup failed");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert!(source.is_some_and(|s| s.contains("N51E003.hgt")));
    }

    #[test]
    fn test_short_route_cannot_be_smoothed() {
        let err = ElevationProfile::from_route(&Slope, &route(3), 5).unwrap_err();
        assert!(matches!(err, ProfileError::WindowTooLarge { .. }));
        // Without smoothing a short route is fine
        assert!(ElevationProfile::from_route(&Slope, &route(3), 0).is_ok());
        // Five points is the shortest route that can be smoothed
        let profile = ElevationProfile::from_route(&Slope, &route(5), 5).unwrap();
        assert_eq!(profile.smoothed.len(), 5);
    }

    #[test]
    fn test_empty_route() {
        assert!(matches!(
            ElevationProfile::from_route(&Slope, &[], 0),
            Err(ProfileError::EmptyRoute)
        ));
    }

    #[test]
    fn test_summary_values() {
        let profile =
            ElevationProfile::from_samples(vec![0.0, 10.0, 20.0], vec![5.0, 7.0, 12.0], 0).unwrap();
        assert_eq!(profile.mean_elevation(), 8.0);
        assert_eq!(profile.min_smoothed(), 5.0);
        assert_eq!(profile.max_smoothed(), 12.0);
        assert_eq!(profile.net_climb(), 7.0);
        assert_eq!(profile.total_distance_m(), 20.0);
    }
}

//! The three outputs of segcomp, from loaded routes to SVG files.
//!
//! Nothing here prompts or reads configuration files. Callers pass the
//! elevation provider, the routes and the settings explicitly.

use anyhow::{bail, Context, Result};
use segcomp_common::{Route, RouteSet};
use segcomp_dem::ElevationProvider;
use segcomp_profile::{
    build_grid, ComparisonBuilder, ElevationProfile, GridBounds, ProfileChart,
};
use segcomp_render::{
    order_by_mean, route_color, write_comparison_svg, write_dashboard_svg, write_map_svg,
    ContourMap, MapStyle,
};
use std::path::Path;
use tracing::{info, warn};

/// Route colour of a map drawn on its own (red).
const SINGLE_MAP_COLOR: usize = 3;

/// Numeric settings shared by all outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub smoothing_passes: usize,
    pub section_length_m: f64,
    pub map_style: MapStyle,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            smoothing_passes: 5,
            section_length_m: 100.0,
            map_style: MapStyle::default(),
        }
    }
}

/// A route together with its elevation profile.
#[derive(Debug, Clone)]
pub struct ProfiledRoute {
    pub route: Route,
    pub profile: ElevationProfile,
}

/// Profile every route, skipping (and logging) those that fail, for example
/// because a tile is missing.
pub fn profile_routes<P>(provider: &P, routes: &RouteSet, passes: usize) -> Vec<ProfiledRoute>
where
    P: ElevationProvider + ?Sized,
{
    let mut profiled = Vec::with_capacity(routes.len());
    for route in routes {
        match ElevationProfile::from_route(provider, &route.points, passes) {
            Ok(profile) => {
                info!(
                    "'{}': {:.0} m, net climb {:.0} m, {:.0}-{:.0} m elevation",
                    route.name,
                    profile.total_distance_m(),
                    profile.net_climb(),
                    profile.min_smoothed(),
                    profile.max_smoothed()
                );
                profiled.push(ProfiledRoute {
                    route: route.clone(),
                    profile,
                });
            }
            Err(e) => warn!("Skipping '{}': {}", route.name, e),
        }
    }
    profiled
}

/// Sort routes by ascending mean elevation, so lower routes are drawn first
/// and higher ones stack above them.
pub fn order_for_viewing(profiled: Vec<ProfiledRoute>) -> Vec<ProfiledRoute> {
    let means: Vec<f64> = profiled.iter().map(|p| p.profile.mean_elevation()).collect();
    let mut slots: Vec<Option<ProfiledRoute>> = profiled.into_iter().map(Some).collect();
    order_by_mean(&means)
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Comparison chart data for `profiled`, in the given order.
pub fn build_charts(profiled: &[ProfiledRoute], section_length_m: f64) -> Result<Vec<ProfileChart>> {
    let mut builder = ComparisonBuilder::new(section_length_m);
    for p in profiled {
        builder
            .add(p.route.name.as_str(), &p.profile)
            .with_context(|| format!("Failed to build chart for '{}'", p.route.name))?;
    }
    Ok(builder.into_charts())
}

/// Elevation grid and styling for one route's map.
pub fn build_map<P>(provider: &P, route: &Route, color_index: usize) -> Result<ContourMap>
where
    P: ElevationProvider + ?Sized,
{
    let bounds = GridBounds::around(&route.points)
        .with_context(|| format!("Route '{}' has no points", route.name))?;
    let grid = build_grid(provider, &bounds)
        .with_context(|| format!("Failed to build elevation grid for '{}'", route.name))?;
    Ok(ContourMap {
        name: route.name.clone(),
        route: route.points.clone(),
        grid,
        color: route_color(color_index),
    })
}

/// Write the comparison chart of `routes`, in their given order.
pub fn run_compare<P>(
    provider: &P,
    routes: &RouteSet,
    settings: &PipelineSettings,
    output: &Path,
    size: (u32, u32),
) -> Result<()>
where
    P: ElevationProvider + ?Sized,
{
    let profiled = profile_routes(provider, routes, settings.smoothing_passes);
    if profiled.is_empty() {
        bail!("None of the {} routes could be profiled", routes.len());
    }
    let charts = build_charts(&profiled, settings.section_length_m)?;
    write_comparison_svg(output, size, &charts)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Write the contour map of a single route.
pub fn run_map<P>(
    provider: &P,
    route: &Route,
    settings: &PipelineSettings,
    output: &Path,
    size: (u32, u32),
) -> Result<()>
where
    P: ElevationProvider + ?Sized,
{
    let map = build_map(provider, route, SINGLE_MAP_COLOR)?;
    write_map_svg(output, size, &map, &settings.map_style)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Write the comparison chart and one map per route on a single canvas.
pub fn run_dashboard<P>(
    provider: &P,
    routes: &RouteSet,
    settings: &PipelineSettings,
    output: &Path,
    cell_size: (u32, u32),
) -> Result<()>
where
    P: ElevationProvider + ?Sized,
{
    let profiled = order_for_viewing(profile_routes(provider, routes, settings.smoothing_passes));

    // A route whose map cannot be built is dropped from the chart too, so
    // chart and map colours stay paired.
    let mut kept: Vec<ProfiledRoute> = Vec::with_capacity(profiled.len());
    let mut maps = Vec::with_capacity(profiled.len());
    for p in profiled {
        match build_map(provider, &p.route, kept.len()) {
            Ok(map) => {
                maps.push(map);
                kept.push(p);
            }
            Err(e) => warn!("Skipping '{}': {:#}", p.route.name, e),
        }
    }
    if kept.is_empty() {
        bail!("None of the {} routes could be mapped", routes.len());
    }
    let charts = build_charts(&kept, settings.section_length_m)?;

    write_dashboard_svg(output, cell_size, &charts, &maps, &settings.map_style)
        .with_context(|| format!("Failed to write {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use segcomp_common::Coordinate;
    use segcomp_dem::DemError;

    /// Flat ground at a height set by longitude; nothing west of 0.
    struct Terraces;

    impl ElevationProvider for Terraces {
        fn elevation(&self, _lat: f64, lon: f64) -> segcomp_dem::Result<f64> {
            if lon < 0.0 {
                return Err(DemError::TileNotFound {
                    name: "N51W001.hgt".to_string(),
                });
            }
            Ok(lon * 100.0)
        }
    }

    fn route(name: &str, lon: f64) -> Route {
        let points = (0..8)
            .map(|i| Coordinate::new(51.0 + i as f64 * 0.001, lon))
            .collect();
        Route::new(name, points)
    }

    #[test]
    fn test_failed_routes_are_skipped() {
        let routes: RouteSet = [route("east", 3.0), route("west", -0.5), route("far", 4.0)]
            .into_iter()
            .collect();
        let profiled = profile_routes(&Terraces, &routes, 5);
        let names: Vec<&str> = profiled.iter().map(|p| p.route.name.as_str()).collect();
        assert_eq!(names, vec!["east", "far"]);
    }

    #[test]
    fn test_viewing_order_by_mean_elevation() {
        let routes: RouteSet = [route("high", 5.0), route("low", 1.0), route("mid", 3.0)]
            .into_iter()
            .collect();
        let ordered = order_for_viewing(profile_routes(&Terraces, &routes, 0));
        let names: Vec<&str> = ordered.iter().map(|p| p.route.name.as_str()).collect();
        assert_eq!(names, vec!["low", "mid", "high"]);
    }

    #[test]
    fn test_dashboard_skips_route_whose_map_leaves_the_tiles() {
        // Profiles fine, but the map margin reaches west of 0
        let routes: RouteSet = [route("inner", 0.5), route("edge", 0.0005)]
            .into_iter()
            .collect();
        assert_eq!(profile_routes(&Terraces, &routes, 5).len(), 2);
        assert!(build_map(&Terraces, routes.get("edge").unwrap(), 0).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("dashboard.svg");
        run_dashboard(&Terraces, &routes, &PipelineSettings::default(), &output, (200, 150))
            .unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("inner"));
        assert!(!svg.contains("edge"));
    }

    #[test]
    fn test_dashboard_without_mappable_routes_is_an_error() {
        let routes: RouteSet = [route("edge", 0.0005)].into_iter().collect();
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("dashboard.svg");
        let result =
            run_dashboard(&Terraces, &routes, &PipelineSettings::default(), &output, (200, 150));
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_no_profiles_is_an_error() {
        let routes: RouteSet = [route("west", -2.0)].into_iter().collect();
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("chart.svg");
        let result = run_compare(&Terraces, &routes, &PipelineSettings::default(), &output, (10, 10));
        assert!(result.is_err());
        assert!(!output.exists());
    }
}

//! Rendering to SVG files on disk.

use segcomp_common::Coordinate;
use segcomp_profile::{linspace, ComparisonBuilder, ElevationGrid, ElevationProfile};
use segcomp_render::{
    route_color, write_comparison_svg, write_dashboard_svg, write_map_svg, ContourMap, MapStyle,
};
use std::fs;
use tempfile::TempDir;

fn ridge_grid() -> ElevationGrid {
    let lons = linspace(3.0, 3.01, 11);
    let lats = linspace(51.0, 51.01, 11);
    let values = (0..11)
        .flat_map(|r| (0..11).map(move |c| 80.0 + 12.0 * r as f64 + 3.0 * c as f64))
        .collect();
    ElevationGrid::new(lons, lats, values).unwrap()
}

fn map(name: &str, index: usize) -> ContourMap {
    ContourMap {
        name: name.to_string(),
        route: vec![Coordinate::new(51.001, 3.001), Coordinate::new(51.009, 3.002)],
        grid: ridge_grid(),
        color: route_color(index),
    }
}

fn charts() -> Vec<segcomp_profile::ProfileChart> {
    let mut builder = ComparisonBuilder::new(100.0);
    for (name, climb) in [("Gentle", 0.04), ("Steep", 0.15)] {
        let distances: Vec<f64> = (0..=12).map(|i| i as f64 * 90.0).collect();
        let raw: Vec<f64> = distances.iter().map(|d| 100.0 + d * climb).collect();
        let profile = ElevationProfile::from_samples(distances, raw, 2).unwrap();
        builder.add(name, &profile).unwrap();
    }
    builder.into_charts()
}

#[test]
fn test_write_comparison() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.svg");
    write_comparison_svg(&path, (800, 500), &charts()).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Gentle"));
    assert!(svg.contains("Steep"));
}

#[test]
fn test_write_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("map.svg");
    write_map_svg(&path, (600, 600), &map("Ridge", 0), &MapStyle::default()).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Ridge"));
    assert!(svg.contains("<polyline") || svg.contains("<path"));
}

#[test]
fn test_write_dashboard() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.svg");
    let maps = vec![map("Gentle", 0), map("Steep", 1)];
    write_dashboard_svg(&path, (400, 300), &charts(), &maps, &MapStyle::default()).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    // 2 routes: 2x2 cells of 400x300
    assert!(svg.contains("width=\"800\""));
    assert!(svg.contains("height=\"600\""));
    assert!(svg.matches("Steep").count() >= 2);
}

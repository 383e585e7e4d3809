//! # segcomp-render
//!
//! SVG output for segcomp through `plotters`:
//!
//! - [`render_comparison`]: elevation profiles of several routes on shared
//!   axes, filled with gradient-coloured bands.
//! - [`render_contour_map`]: terrain, hill shade and contours around one
//!   route, with the route drawn on top.
//! - [`render_dashboard`]: both of the above in one near-square grid.
//!
//! The `render_*` functions draw onto any plotters drawing area. The
//! `write_*_svg` helpers create the SVG file and present it.

mod chart;
mod dashboard;
mod error;
mod map;
mod palette;

pub use chart::{comparison_ranges, render_comparison};
pub use dashboard::{order_by_mean, render_dashboard, DashboardLayout};
pub use error::RenderError;
pub use map::{fit_scaled, render_contour_map, ContourLayers, ContourLevel, ContourMap, MapStyle};
pub use palette::{
    earth_color, route_color, shade_grey, tier_color, BAND_ALPHA, ROUTE_COLORS, SHADE_ALPHA,
};

use plotters::prelude::*;
use segcomp_profile::ProfileChart;
use std::path::Path;
use tracing::info;

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Write a comparison chart to an SVG file.
pub fn write_comparison_svg(path: &Path, size: (u32, u32), charts: &[ProfileChart]) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    render_comparison(&root, charts)?;
    root.present()?;
    info!("Wrote comparison chart to {}", path.display());
    Ok(())
}

/// Write a contour map to an SVG file.
pub fn write_map_svg(path: &Path, size: (u32, u32), map: &ContourMap, style: &MapStyle) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    render_contour_map(&root, map, style)?;
    root.present()?;
    info!("Wrote contour map to {}", path.display());
    Ok(())
}

/// Write a dashboard to an SVG file. `cell_size` is the size of each grid
/// cell; the canvas grows with the number of routes.
pub fn write_dashboard_svg(
    path: &Path,
    cell_size: (u32, u32),
    charts: &[ProfileChart],
    maps: &[ContourMap],
    style: &MapStyle,
) -> Result<()> {
    let size = DashboardLayout::for_routes(maps.len()).canvas_size(cell_size);
    let root = SVGBackend::new(path, size).into_drawing_area();
    render_dashboard(&root, charts, maps, style)?;
    root.present()?;
    info!("Wrote dashboard to {}", path.display());
    Ok(())
}

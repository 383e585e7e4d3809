//! Topographic contour map of a single route.
//!
//! Layers, bottom to top: terrain colour cells, hill-shade overlay, minor
//! contours, major contours with elevation labels, then the route itself.

use crate::palette::{
    earth_color, normalize, shade_grey, MAJOR_CONTOUR_ALPHA, MINOR_CONTOUR_ALPHA, SHADE_ALPHA,
};
use crate::{RenderError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use segcomp_common::Coordinate;
use segcomp_profile::{contour_levels, march_squares, ContourSegment, ElevationGrid};
use tracing::debug;

/// Contour spacing and refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapStyle {
    /// Spacing of labelled contours, in meters.
    pub major_step_m: f64,
    /// Spacing of thin contours, in meters.
    pub minor_step_m: f64,
    /// Grid refinement applied before contouring.
    pub refine_factor: usize,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            major_step_m: 50.0,
            minor_step_m: 10.0,
            refine_factor: 6,
        }
    }
}

/// Everything needed to draw one route's map.
#[derive(Debug, Clone)]
pub struct ContourMap {
    pub name: String,
    pub route: Vec<Coordinate>,
    pub grid: ElevationGrid,
    pub color: RGBColor,
}

/// Contour lines at one elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLevel {
    pub elevation: f64,
    pub segments: Vec<ContourSegment>,
}

impl ContourLevel {
    /// Where to put the elevation label: the middle of the longest segment.
    pub fn label_anchor(&self) -> Option<(f64, f64)> {
        self.segments
            .iter()
            .max_by(|a, b| a.length().total_cmp(&b.length()))
            .map(ContourSegment::midpoint)
    }
}

/// Major and minor contour lines of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLayers {
    pub major: Vec<ContourLevel>,
    pub minor: Vec<ContourLevel>,
}

impl ContourLayers {
    /// Refine `grid` and trace contours at the style's spacings.
    pub fn build(grid: &ElevationGrid, style: &MapStyle) -> Result<Self> {
        let fine = grid.upsample(style.refine_factor)?;
        let (min, max) = (fine.min(), fine.max());
        let trace = |step: f64| -> Vec<ContourLevel> {
            contour_levels(min, max, step)
                .into_iter()
                .map(|elevation| ContourLevel {
                    elevation,
                    segments: march_squares(&fine, elevation),
                })
                .filter(|level| !level.segments.is_empty())
                .collect()
        };
        Ok(Self {
            major: trace(style.major_step_m),
            minor: trace(style.minor_step_m),
        })
    }
}

/// Offset and size of the largest box inside `available` pixels whose
/// aspect ratio matches `spans` (lon, lat), centred.
pub fn fit_scaled(available: (u32, u32), spans: (f64, f64)) -> ((u32, u32), (u32, u32)) {
    let (w, h) = (available.0 as f64, available.1 as f64);
    let (sx, sy) = spans;
    if !(sx > 0.0) || !(sy > 0.0) || w <= 0.0 || h <= 0.0 {
        return ((0, 0), available);
    }
    let scale = (w / sx).min(h / sy);
    let fw = ((sx * scale + 1e-6).floor() as u32).clamp(1, available.0.max(1));
    let fh = ((sy * scale + 1e-6).floor() as u32).clamp(1, available.1.max(1));
    (((available.0 - fw) / 2, (available.1 - fh) / 2), (fw, fh))
}

/// Height reserved above the map for the route name.
const CAPTION_HEIGHT: u32 = 30;

/// Draw `map` onto `area` with equal scaling of both degree axes.
pub fn render_contour_map<DB>(
    area: &DrawingArea<DB, Shift>,
    map: &ContourMap,
    style: &MapStyle,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let grid = &map.grid;
    if grid.rows() < 2 || grid.cols() < 2 {
        return Err(RenderError::NothingToDraw(format!(
            "grid for '{}' is {}x{}",
            map.name,
            grid.rows(),
            grid.cols()
        )));
    }
    let lon_range = grid.lons[0]..grid.lons[grid.cols() - 1];
    let lat_range = grid.lats[0]..grid.lats[grid.rows() - 1];
    let layers = ContourLayers::build(grid, style)?;
    debug!(
        "Map '{}': {}x{} grid, {} major and {} minor levels",
        map.name,
        grid.rows(),
        grid.cols(),
        layers.major.len(),
        layers.minor.len()
    );

    area.fill(&WHITE)?;
    let (titled, body) = area.split_vertically(CAPTION_HEIGHT);
    titled.titled(&map.name, ("sans-serif", 16))?;

    let (width, height) = body.dim_in_pixel();
    let (offset, size) = fit_scaled(
        (width, height),
        (lon_range.end - lon_range.start, lat_range.end - lat_range.start),
    );
    let plot = body.shrink(offset, size);

    let mut chart = ChartBuilder::on(&plot).build_cartesian_2d(lon_range, lat_range)?;

    // Terrain and shade, one rectangle per grid cell
    let (z_min, z_max) = (grid.min(), grid.max());
    let shade = grid.shade();
    let s_min = shade.iter().copied().fold(f64::INFINITY, f64::min);
    let s_max = shade.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let cols = grid.cols();

    let cells = (0..grid.rows() - 1).flat_map(|r| (0..cols - 1).map(move |c| (r, c)));
    chart.draw_series(cells.clone().map(|(r, c)| {
        let z = (grid.values[r * cols + c]
            + grid.values[r * cols + c + 1]
            + grid.values[(r + 1) * cols + c]
            + grid.values[(r + 1) * cols + c + 1])
            / 4.0;
        Rectangle::new(
            [(grid.lons[c], grid.lats[r]), (grid.lons[c + 1], grid.lats[r + 1])],
            earth_color(normalize(z, z_min, z_max)).filled(),
        )
    }))?;
    chart.draw_series(cells.map(|(r, c)| {
        let s = shade[r * cols + c];
        Rectangle::new(
            [(grid.lons[c], grid.lats[r]), (grid.lons[c + 1], grid.lats[r + 1])],
            shade_grey(normalize(s, s_min, s_max)).mix(SHADE_ALPHA).filled(),
        )
    }))?;

    for level in &layers.minor {
        chart.draw_series(level.segments.iter().map(|s| {
            PathElement::new(vec![s.a, s.b], BLACK.mix(MINOR_CONTOUR_ALPHA).stroke_width(1))
        }))?;
    }
    for level in &layers.major {
        chart.draw_series(level.segments.iter().map(|s| {
            PathElement::new(vec![s.a, s.b], BLACK.mix(MAJOR_CONTOUR_ALPHA).stroke_width(2))
        }))?;
        if let Some(anchor) = level.label_anchor() {
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.0}", level.elevation),
                anchor,
                ("sans-serif", 11).into_font().color(&BLACK),
            )))?;
        }
    }

    chart.draw_series(LineSeries::new(
        map.route.iter().map(|p| (p.lon, p.lat)),
        map.color.stroke_width(2),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use segcomp_profile::linspace;

    /// Cone peaking at 140 m in the middle of a 9x9 grid.
    fn cone() -> ElevationGrid {
        let lons = linspace(3.0, 3.008, 9);
        let lats = linspace(51.0, 51.008, 9);
        let mut values = Vec::new();
        for r in 0..9 {
            for c in 0..9 {
                let d = ((r as f64 - 4.0).powi(2) + (c as f64 - 4.0).powi(2)).sqrt();
                values.push(140.0 - d * 20.0);
            }
        }
        ElevationGrid::new(lons, lats, values).unwrap()
    }

    #[test]
    fn test_contour_layers() {
        let layers = ContourLayers::build(&cone(), &MapStyle::default()).unwrap();
        let majors: Vec<f64> = layers.major.iter().map(|l| l.elevation).collect();
        assert_eq!(majors, vec![50.0, 100.0]);
        assert!(layers.minor.len() > layers.major.len());
        assert!(layers.major.iter().all(|l| l.label_anchor().is_some()));
    }

    #[test]
    fn test_fit_scaled_keeps_aspect() {
        // Twice as wide as tall in a square canvas
        let (offset, size) = fit_scaled((400, 400), (0.02, 0.01));
        assert_eq!(size, (400, 200));
        assert_eq!(offset, (0, 100));

        let (offset, size) = fit_scaled((300, 600), (0.01, 0.01));
        assert_eq!(size, (300, 300));
        assert_eq!(offset, (0, 150));
    }

    #[test]
    fn test_map_svg() {
        let map = ContourMap {
            name: "Cone".to_string(),
            route: vec![Coordinate::new(51.001, 3.001), Coordinate::new(51.004, 3.004)],
            grid: cone(),
            color: RGBColor(0x1f, 0x77, 0xb4),
        };
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (500, 500)).into_drawing_area();
            render_contour_map(&root, &map, &MapStyle::default()).unwrap();
            root.present().unwrap();
        }
        assert!(svg.contains("Cone"));
        assert!(svg.contains(">100<"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let map = ContourMap {
            name: "Dot".to_string(),
            route: vec![Coordinate::new(51.0, 3.0)],
            grid: ElevationGrid::new(vec![3.0], vec![51.0], vec![10.0]).unwrap(),
            color: RGBColor(0, 0, 0),
        };
        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (100, 100)).into_drawing_area();
        assert!(matches!(
            render_contour_map(&root, &map, &MapStyle::default()),
            Err(RenderError::NothingToDraw(_))
        ));
    }
}

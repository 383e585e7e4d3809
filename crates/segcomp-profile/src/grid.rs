//! Rectangular elevation grids around a route.
//!
//! The grid covers the route's bounding box plus a margin, sampled at about
//! one thousandth of a degree. Rows run from south to north and columns from
//! west to east, so `values[row * cols + col]` is the elevation at
//! `(lats[row], lons[col])`.

use crate::resample::linspace;
use crate::{ProfileError, Result};
use segcomp_common::Coordinate;
use segcomp_dem::ElevationProvider;
use tracing::debug;

/// Samples per degree along each axis of a mesh.
pub const SAMPLES_PER_DEGREE: f64 = 1000.0;

/// Smallest margin added on each side of the route, in degrees.
pub const MIN_MARGIN_DEG: f64 = 0.001;

/// Geographic box a grid is built over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GridBounds {
    /// Bounding box of `points` grown by 5% of the span on each axis
    /// (truncated to 0.001°, at least 0.001°).
    pub fn around(points: &[Coordinate]) -> Result<Self> {
        let first = points.first().ok_or(ProfileError::EmptyRoute)?;
        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        for p in &points[1..] {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.max_lon = bounds.max_lon.max(p.lon);
        }

        let lat_margin = margin(bounds.max_lat - bounds.min_lat);
        let lon_margin = margin(bounds.max_lon - bounds.min_lon);
        bounds.min_lat -= lat_margin;
        bounds.max_lat += lat_margin;
        bounds.min_lon -= lon_margin;
        bounds.max_lon += lon_margin;
        Ok(bounds)
    }

    /// Evenly spaced sample positions covering the box, ends included.
    pub fn mesh(&self) -> Mesh {
        Mesh {
            lons: axis(self.min_lon, self.max_lon),
            lats: axis(self.min_lat, self.max_lat),
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

fn margin(span: f64) -> f64 {
    ((span * 50.0).trunc() / 1000.0).max(MIN_MARGIN_DEG)
}

fn axis(min: f64, max: f64) -> Vec<f64> {
    let count = (max * SAMPLES_PER_DEGREE).floor() - (min * SAMPLES_PER_DEGREE).floor();
    linspace(min, max, (count as usize).max(2))
}

/// Sample positions of a grid: longitudes for columns, latitudes for rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
}

impl Mesh {
    pub fn rows(&self) -> usize {
        self.lats.len()
    }

    pub fn cols(&self) -> usize {
        self.lons.len()
    }
}

/// Elevations sampled on a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    /// Row-major, `lats.len() * lons.len()` values.
    pub values: Vec<f64>,
}

impl ElevationGrid {
    /// Wrap precomputed values. `values` must hold one value per mesh cell.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if values.len() != lons.len() * lats.len() {
            return Err(ProfileError::InvalidParameter(format!(
                "grid of {}x{} needs {} values, got {}",
                lats.len(),
                lons.len(),
                lons.len() * lats.len(),
                values.len()
            )));
        }
        Ok(Self { lons, lats, values })
    }

    pub fn rows(&self) -> usize {
        self.lats.len()
    }

    pub fn cols(&self) -> usize {
        self.lons.len()
    }

    /// Elevation at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.values.get(row * self.cols() + col).copied()
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Hill-shade term: negated sum of the east and north derivatives, in
    /// elevation per degree. Border cells are 0.
    pub fn shade(&self) -> Vec<f64> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut out = vec![0.0; self.values.len()];
        if rows < 3 || cols < 3 {
            return out;
        }
        let z = |r: usize, c: usize| self.values[r * cols + c];

        for r in 1..rows - 1 {
            for c in 1..cols - 1 {
                let gx = (z(r, c + 1) - z(r, c - 1)) / (self.lons[c + 1] - self.lons[c - 1]);
                let gy = (z(r + 1, c) - z(r - 1, c)) / (self.lats[r + 1] - self.lats[r - 1]);
                out[r * cols + c] = -(gx + gy);
            }
        }
        out
    }

    /// Bilinear refinement inserting `factor - 1` samples between each pair
    /// of neighbours. A factor of 1 returns a copy.
    pub fn upsample(&self, factor: usize) -> Result<Self> {
        if factor == 0 {
            return Err(ProfileError::InvalidParameter(
                "upsample factor must be at least 1".to_string(),
            ));
        }
        if factor == 1 || self.rows() < 2 || self.cols() < 2 {
            return Ok(self.clone());
        }

        let lons = refine_axis(&self.lons, factor);
        let lats = refine_axis(&self.lats, factor);
        let cols = self.cols();
        let mut values = Vec::with_capacity(lons.len() * lats.len());

        for r in 0..lats.len() {
            let (r0, tr) = split_index(r, factor, self.rows());
            for c in 0..lons.len() {
                let (c0, tc) = split_index(c, factor, cols);
                let v00 = self.values[r0 * cols + c0];
                let v01 = self.values[r0 * cols + c0 + 1];
                let v10 = self.values[(r0 + 1) * cols + c0];
                let v11 = self.values[(r0 + 1) * cols + c0 + 1];
                let south = v00 + tc * (v01 - v00);
                let north = v10 + tc * (v11 - v10);
                values.push(south + tr * (north - south));
            }
        }

        Ok(Self { lons, lats, values })
    }
}

fn refine_axis(axis: &[f64], factor: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity((axis.len() - 1) * factor + 1);
    for pair in axis.windows(2) {
        let step = (pair[1] - pair[0]) / factor as f64;
        out.extend((0..factor).map(|k| pair[0] + k as f64 * step));
    }
    out.extend(axis.last());
    out
}

/// Source cell and fractional offset of refined index `i`.
fn split_index(i: usize, factor: usize, len: usize) -> (usize, f64) {
    let cell = i / factor;
    if cell >= len - 1 {
        (len - 2, 1.0)
    } else {
        (cell, (i % factor) as f64 / factor as f64)
    }
}

/// Sample `provider` at every cell of `bounds`' mesh, row by row from south
/// to north. The first provider error aborts the build.
pub fn build_grid<P>(provider: &P, bounds: &GridBounds) -> Result<ElevationGrid>
where
    P: ElevationProvider + ?Sized,
{
    let Mesh { lons, lats } = bounds.mesh();
    debug!("Building {}x{} elevation grid", lats.len(), lons.len());

    let mut values = Vec::with_capacity(lons.len() * lats.len());
    for &lat in &lats {
        for &lon in &lons {
            values.push(provider.elevation(lat, lon)?);
        }
    }
    Ok(ElevationGrid { lons, lats, values })
}

//! Contour levels and marching-squares contour extraction.

use crate::grid::ElevationGrid;

/// Multiples of `step` from the one at or below `min` to the one at or
/// below `max`, inclusive.
pub fn contour_levels(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    let first = (min / step).floor() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// A straight piece of a contour line, as `(lon, lat)` end points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSegment {
    pub a: (f64, f64),
    pub b: (f64, f64),
}

impl ContourSegment {
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.a.0 + self.b.0) / 2.0, (self.a.1 + self.b.1) / 2.0)
    }

    pub fn length(&self) -> f64 {
        (self.b.0 - self.a.0).hypot(self.b.1 - self.a.1)
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

/// Contour segments of `grid` at `level`.
///
/// Corners at or above the level count as inside. Saddle cells are resolved
/// with the mean of the four corners. Cells with a NaN corner are skipped.
pub fn march_squares(grid: &ElevationGrid, level: f64) -> Vec<ContourSegment> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut segments = Vec::new();
    if rows < 2 || cols < 2 {
        return segments;
    }
    let z = |r: usize, c: usize| grid.values[r * cols + c];

    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let sw = z(r, c);
            let se = z(r, c + 1);
            let ne = z(r + 1, c + 1);
            let nw = z(r + 1, c);
            if sw.is_nan() || se.is_nan() || ne.is_nan() || nw.is_nan() {
                continue;
            }

            let case = (sw >= level) as u8
                | ((se >= level) as u8) << 1
                | ((ne >= level) as u8) << 2
                | ((nw >= level) as u8) << 3;

            let point = |edge: Edge| -> (f64, f64) {
                let (x0, x1) = (grid.lons[c], grid.lons[c + 1]);
                let (y0, y1) = (grid.lats[r], grid.lats[r + 1]);
                match edge {
                    Edge::Bottom => (lerp(x0, x1, crossing(sw, se, level)), y0),
                    Edge::Top => (lerp(x0, x1, crossing(nw, ne, level)), y1),
                    Edge::Left => (x0, lerp(y0, y1, crossing(sw, nw, level))),
                    Edge::Right => (x1, lerp(y0, y1, crossing(se, ne, level))),
                }
            };
            let mut emit = |from: Edge, to: Edge| {
                segments.push(ContourSegment {
                    a: point(from),
                    b: point(to),
                });
            };

            match case {
                0 | 15 => {}
                1 | 14 => emit(Edge::Left, Edge::Bottom),
                2 | 13 => emit(Edge::Bottom, Edge::Right),
                3 | 12 => emit(Edge::Left, Edge::Right),
                4 | 11 => emit(Edge::Right, Edge::Top),
                6 | 9 => emit(Edge::Bottom, Edge::Top),
                7 | 8 => emit(Edge::Left, Edge::Top),
                _ => {
                    // Saddle: 5 or 10
                    let center = (sw + se + ne + nw) / 4.0;
                    if (center >= level) == (sw >= level) {
                        emit(Edge::Bottom, Edge::Right);
                        emit(Edge::Top, Edge::Left);
                    } else {
                        emit(Edge::Left, Edge::Bottom);
                        emit(Edge::Right, Edge::Top);
                    }
                }
            }
        }
    }
    segments
}

fn crossing(a: f64, b: f64, level: f64) -> f64 {
    if b == a {
        0.5
    } else {
        ((level - a) / (b - a)).clamp(0.0, 1.0)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(lons: Vec<f64>, lats: Vec<f64>, values: Vec<f64>) -> ElevationGrid {
        ElevationGrid::new(lons, lats, values).unwrap()
    }

    #[test]
    fn test_levels_cover_range() {
        assert_eq!(contour_levels(123.0, 287.0, 50.0), vec![100.0, 150.0, 200.0, 250.0]);
        assert_eq!(contour_levels(100.0, 100.0, 10.0), vec![100.0]);
        assert_eq!(contour_levels(-15.0, 5.0, 10.0), vec![-20.0, -10.0, 0.0]);
        assert!(contour_levels(0.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_single_crossing() {
        // Rises to the east, level crosses halfway along each row edge
        let g = grid(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 10.0, 0.0, 10.0]);
        let segs = march_squares(&g, 5.0);
        assert_eq!(segs.len(), 1);
        assert_relative_eq!(segs[0].a.0, 0.5);
        assert_relative_eq!(segs[0].b.0, 0.5);
        assert_relative_eq!(segs[0].length(), 1.0);
    }

    #[test]
    fn test_flat_grid_has_no_contours() {
        let g = grid(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], vec![7.0; 6]);
        assert!(march_squares(&g, 5.0).is_empty());
        assert!(march_squares(&g, 10.0).is_empty());
    }

    #[test]
    fn test_peak_is_closed_ring() {
        let g = grid(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec![0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0],
        );
        let segs = march_squares(&g, 5.0);
        assert_eq!(segs.len(), 4);
        for s in &segs {
            let (x, y) = s.midpoint();
            assert!((x - 1.0).abs() <= 0.5 && (y - 1.0).abs() <= 0.5);
        }
    }

    #[test]
    fn test_saddle_emits_two_segments() {
        let g = grid(vec![0.0, 1.0], vec![0.0, 1.0], vec![10.0, 0.0, 0.0, 10.0]);
        assert_eq!(march_squares(&g, 5.0).len(), 2);
    }

    #[test]
    fn test_nan_cells_skipped() {
        let g = grid(vec![0.0, 1.0], vec![0.0, 1.0], vec![f64::NAN, 10.0, 0.0, 10.0]);
        assert!(march_squares(&g, 5.0).is_empty());
    }
}

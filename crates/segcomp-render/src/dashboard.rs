//! Grid of one comparison chart plus one contour map per route.

use crate::chart::render_comparison;
use crate::map::{render_contour_map, ContourMap, MapStyle};
use crate::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use segcomp_profile::ProfileChart;
use tracing::debug;

/// Rows and columns of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub rows: usize,
    pub cols: usize,
}

impl DashboardLayout {
    /// Smallest near-square layout holding a chart and `routes` maps.
    pub fn for_routes(routes: usize) -> Self {
        let cells = routes + 1;
        let cols = (cells as f64).sqrt().ceil() as usize;
        let rows = cells.div_ceil(cols);
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row and column of cell `index`, filled row by row.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Canvas size for cells of `cell` pixels.
    pub fn canvas_size(&self, cell: (u32, u32)) -> (u32, u32) {
        (cell.0 * self.cols as u32, cell.1 * self.rows as u32)
    }
}

/// Indices of `means` in ascending order. Ties keep their input order.
pub fn order_by_mean(means: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..means.len()).collect();
    order.sort_by(|&a, &b| means[a].total_cmp(&means[b]));
    order
}

/// Draw the comparison chart in the first cell and `maps` in the following
/// cells. Remaining cells are left blank.
pub fn render_dashboard<DB>(
    area: &DrawingArea<DB, Shift>,
    charts: &[ProfileChart],
    maps: &[ContourMap],
    style: &MapStyle,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let layout = DashboardLayout::for_routes(maps.len());
    debug!("Dashboard layout {}x{}", layout.rows, layout.cols);

    area.fill(&WHITE)?;
    let cells = area.split_evenly((layout.rows, layout.cols));
    let mut cells = cells.iter();

    if let Some(cell) = cells.next() {
        render_comparison(cell, charts)?;
    }
    for (index, (map, cell)) in maps.iter().zip(&mut cells).enumerate() {
        let (row, col) = layout.position(index + 1);
        debug!("Map '{}' in row {}, column {}", map.name, row, col);
        render_contour_map(cell, map, style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts() {
        assert_eq!(DashboardLayout::for_routes(1), DashboardLayout { rows: 1, cols: 2 });
        assert_eq!(DashboardLayout::for_routes(2), DashboardLayout { rows: 2, cols: 2 });
        assert_eq!(DashboardLayout::for_routes(3), DashboardLayout { rows: 2, cols: 2 });
        assert_eq!(DashboardLayout::for_routes(4), DashboardLayout { rows: 2, cols: 3 });
        assert_eq!(DashboardLayout::for_routes(8), DashboardLayout { rows: 3, cols: 3 });
    }

    #[test]
    fn test_every_route_has_a_cell() {
        for n in 0..30 {
            let layout = DashboardLayout::for_routes(n);
            assert!(layout.cell_count() >= n + 1);
            // No fully empty row
            assert!(layout.cell_count() - (n + 1) < layout.cols);
        }
    }

    #[test]
    fn test_positions_and_canvas() {
        let layout = DashboardLayout::for_routes(4);
        assert_eq!(layout.position(0), (0, 0));
        assert_eq!(layout.position(4), (1, 1));
        assert_eq!(layout.canvas_size((640, 480)), (1920, 960));
    }

    #[test]
    fn test_order_by_mean() {
        assert_eq!(order_by_mean(&[300.0, 120.0, 250.0, 120.0]), vec![1, 3, 2, 0]);
        assert!(order_by_mean(&[]).is_empty());
    }
}

//! Elevation comparison chart.

use crate::palette::{route_color, tier_color, BAND_ALPHA};
use crate::{RenderError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use segcomp_profile::ProfileChart;
use std::ops::Range;
use tracing::debug;

/// Room left right of the longest route for its name.
const LABEL_ROOM: f64 = 0.15;

/// Axis ranges covering every route, its bands and its end label.
pub fn comparison_ranges(charts: &[ProfileChart]) -> Option<(Range<f64>, Range<f64>)> {
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for chart in charts {
        for &x in chart.distances_m.iter().chain([chart.label_at.0].iter()) {
            x_max = x_max.max(x);
        }
        for &y in chart.elevations.iter().chain([chart.label_at.1].iter()) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        y_min = y_min.min(chart.floor);
    }

    if !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }
    let x_max = if x_max > 0.0 { x_max * (1.0 + LABEL_ROOM) } else { 1.0 };
    let pad = ((y_max - y_min) * 0.05).max(1.0);
    Some((0.0..x_max, (y_min - pad)..(y_max + pad)))
}

/// Draw the comparison chart of `charts` onto `area`.
///
/// Route `i` is drawn in the `i`-th route colour, gradient bands first and
/// the profile line on top, with the route name at the end of its line.
pub fn render_comparison<DB>(area: &DrawingArea<DB, Shift>, charts: &[ProfileChart]) -> Result<()>
where
    DB: DrawingBackend,
{
    let (x_range, y_range) = comparison_ranges(charts)
        .ok_or_else(|| RenderError::NothingToDraw("no profiles".to_string()))?;
    debug!(
        "Comparison chart: {} routes, x {:?}, y {:?}",
        charts.len(),
        x_range,
        y_range
    );

    area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 55)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&BLACK.mix(0.08))
        .x_desc("Distance (m)")
        .y_desc("Elevation (m)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    for (index, profile) in charts.iter().enumerate() {
        let color = route_color(index);

        chart.draw_series(profile.bands.iter().map(|band| {
            Polygon::new(
                vec![
                    (band.x[0], band.base[0]),
                    (band.x[1], band.base[1]),
                    (band.x[1], band.top[1]),
                    (band.x[0], band.top[0]),
                ],
                tier_color(band.tier).mix(BAND_ALPHA).filled(),
            )
        }))?;

        chart.draw_series(LineSeries::new(
            profile
                .distances_m
                .iter()
                .copied()
                .zip(profile.elevations.iter().copied()),
            color.stroke_width(2),
        ))?;

        chart.draw_series(std::iter::once(Text::new(
            profile.name.clone(),
            profile.label_at,
            ("sans-serif", 14).into_font().color(&color),
        )))?;
    }

    Ok(())
}

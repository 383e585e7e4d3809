//! Cumulative ground distance along a route.

use segcomp_common::{haversine_m, Coordinate};

/// Cumulative great-circle distance in meters for each point of a route.
///
/// The result has the same length as `points`, starts at 0 and never
/// decreases. An empty route yields an empty sequence.
pub fn cumulative_distance_m(points: &[Coordinate]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            total += haversine_m(points[i - 1], *point);
        }
        distances.push(total);
    }
    distances
}

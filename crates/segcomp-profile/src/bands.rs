//! Gradient-coloured bands for comparison charts, with overlap stacking.
//!
//! Each route is resampled at a fixed interval and every interval becomes a
//! band coloured by its slope tier. When several routes share one chart a
//! band is only emitted where it clears the highest route already drawn at
//! that interval, so earlier routes stay visible underneath.

use crate::gradient::{gradient, GradientTier};
use crate::profile::ElevationProfile;
use crate::resample::resample;
use crate::Result;
use tracing::debug;

/// Clearance above an already drawn route before a new band is emitted.
pub const STACK_CLEARANCE_M: f64 = 2.0;

/// Default resampling interval along the distance axis.
pub const DEFAULT_SECTION_LENGTH_M: f64 = 100.0;

/// One filled interval of a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Interval index along the resampled axis.
    pub index: usize,
    /// Start and end distance in meters.
    pub x: [f64; 2],
    /// Profile elevation at start and end.
    pub top: [f64; 2],
    /// Lower edge of the fill at start and end.
    pub base: [f64; 2],
    /// Slope over the interval.
    pub slope: f64,
    /// Tier the slope falls in.
    pub tier: GradientTier,
}

/// Resampled lines drawn so far on one chart.
#[derive(Debug, Clone, Default)]
pub struct BandStacker {
    lines: Vec<Vec<f64>>,
}

impl BandStacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the bands for a resampled line and record it as drawn.
    ///
    /// `floor` is the fill base used where no earlier route lies underneath.
    pub fn stack(&mut self, xi: &[f64], yi: &[f64], floor: f64) -> Result<Vec<Band>> {
        let slopes = gradient(xi, yi)?;
        let mut bands = Vec::new();

        for (i, &slope) in slopes.iter().enumerate() {
            let base = self.base_at(i, floor);
            let lowest_top = yi[i].min(yi[i + 1]);
            if lowest_top > base[0].max(base[1]) {
                bands.push(Band {
                    index: i,
                    x: [xi[i], xi[i + 1]],
                    top: [yi[i], yi[i + 1]],
                    base,
                    slope,
                    tier: GradientTier::classify(slope),
                });
            }
        }

        self.lines.push(yi.to_vec());
        Ok(bands)
    }

    /// Fill base for interval `i`: the highest earlier line plus clearance,
    /// or `floor` when nothing positive lies underneath.
    fn base_at(&self, i: usize, floor: f64) -> [f64; 2] {
        let mut highest: Option<(usize, f64)> = None;
        for (index, line) in self.lines.iter().enumerate() {
            let peak = if line.len() >= i + 2 {
                line[i].max(line[i + 1])
            } else {
                0.0
            };
            if highest.map_or(true, |(_, best)| peak > best) {
                highest = Some((index, peak));
            }
        }

        match highest {
            Some((index, peak)) if peak > 0.0 => {
                let line = &self.lines[index];
                [line[i] + STACK_CLEARANCE_M, line[i + 1] + STACK_CLEARANCE_M]
            }
            _ => [floor, floor],
        }
    }

    /// Number of lines drawn so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Everything a renderer needs to draw one route on a comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileChart {
    /// Route name, used for the end-of-line label.
    pub name: String,
    /// Resampled distances in meters.
    pub distances_m: Vec<f64>,
    /// Resampled smoothed elevations.
    pub elevations: Vec<f64>,
    /// Filled gradient bands.
    pub bands: Vec<Band>,
    /// Label anchor: last point of the unresampled smoothed profile.
    pub label_at: (f64, f64),
    /// Lowest smoothed elevation of the route.
    pub floor: f64,
}

/// Builds the charts of several routes sharing one set of axes.
#[derive(Debug, Clone)]
pub struct ComparisonBuilder {
    section_length_m: f64,
    stacker: BandStacker,
    charts: Vec<ProfileChart>,
}

impl Default for ComparisonBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_LENGTH_M)
    }
}

impl ComparisonBuilder {
    /// Create a builder resampling every `section_length_m` meters.
    pub fn new(section_length_m: f64) -> Self {
        Self {
            section_length_m,
            stacker: BandStacker::new(),
            charts: Vec::new(),
        }
    }

    /// Add a route; routes added later are stacked above earlier ones.
    pub fn add(&mut self, name: impl Into<String>, profile: &ElevationProfile) -> Result<&ProfileChart> {
        let (xi, yi) = resample(&profile.distances_m, &profile.smoothed, self.section_length_m)?;
        let floor = profile.min_smoothed();
        let bands = self.stacker.stack(&xi, &yi, floor)?;
        let name: String = name.into();
        if let Some(steepest) = bands.iter().max_by(|a, b| a.slope.total_cmp(&b.slope)) {
            debug!(
                "'{}': {} bands, steepest {:.1}% ({})",
                name,
                bands.len(),
                steepest.slope * 100.0,
                steepest.tier.label()
            );
        }

        let label_at = (
            profile.total_distance_m(),
            profile.smoothed.last().copied().unwrap_or(floor),
        );
        self.charts.push(ProfileChart {
            name,
            distances_m: xi,
            elevations: yi,
            bands,
            label_at,
            floor,
        });
        let last = self.charts.len() - 1;
        Ok(&self.charts[last])
    }

    /// Charts in the order they were added.
    pub fn charts(&self) -> &[ProfileChart] {
        &self.charts
    }

    pub fn into_charts(self) -> Vec<ProfileChart> {
        self.charts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_route_sits_on_its_floor() {
        let mut stacker = BandStacker::new();
        let xi = [0.0, 100.0, 200.0, 300.0];
        let yi = [10.0, 20.0, 15.0, 40.0];
        let bands = stacker.stack(&xi, &yi, 5.0).unwrap();

        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.base == [5.0, 5.0]));
        assert_eq!(bands[0].tier, GradientTier::Moderate);
        assert_eq!(bands[1].tier, GradientTier::Downhill);
        assert_eq!(bands[2].tier, GradientTier::Steep);
        assert_eq!(stacker.len(), 1);
    }

    #[test]
    fn test_band_skipped_at_floor() {
        let mut stacker = BandStacker::new();
        // The first interval touches the floor, so it is not strictly above it
        let bands = stacker.stack(&[0.0, 100.0, 200.0], &[5.0, 6.0, 7.0], 5.0).unwrap();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].index, 1);
    }

    #[test]
    fn test_second_route_stacks_above_first() {
        let mut stacker = BandStacker::new();
        let xi = [0.0, 100.0, 200.0, 300.0];
        stacker.stack(&xi, &[10.0, 10.0, 10.0, 10.0], 10.0).unwrap();

        // Crosses the first line: only intervals clearing it by 2 m are kept
        let yi = [9.0, 11.0, 13.0, 15.0];
        let bands = stacker.stack(&xi, &yi, 9.0).unwrap();
        let indices: Vec<usize> = bands.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![2]);
        assert_eq!(bands[0].base, [12.0, 12.0]);
    }

    #[test]
    fn test_shorter_earlier_route_does_not_cover_later_intervals() {
        let mut stacker = BandStacker::new();
        stacker.stack(&[0.0, 100.0], &[50.0, 60.0], 50.0).unwrap();

        let xi = [0.0, 100.0, 200.0, 300.0];
        let yi = [20.0, 30.0, 40.0, 50.0];
        let bands = stacker.stack(&xi, &yi, 20.0).unwrap();
        // Interval 0 is hidden under the first route, later ones fall back to the floor
        let indices: Vec<usize> = bands.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert!(bands.iter().all(|b| b.base == [20.0, 20.0]));
    }

    #[test]
    fn test_builder_resamples_profile() {
        let distances: Vec<f64> = (0..=10).map(|i| i as f64 * 55.0).collect();
        let raw: Vec<f64> = distances.iter().map(|d| 100.0 + d * 0.12).collect();
        let profile = ElevationProfile::from_samples(distances, raw, 0).unwrap();

        let mut builder = ComparisonBuilder::new(100.0);
        let chart = builder.add("Wall", &profile).unwrap();
        assert_eq!(chart.distances_m, vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0]);
        assert_eq!(chart.bands.len(), 4);
        assert!(chart.bands.iter().all(|b| b.tier == GradientTier::Moderate));
        assert_eq!(chart.label_at.0, 550.0);
    }
}

//! Per-interval slopes and the four gradient tiers.

use crate::{ProfileError, Result};

/// Slope `Δy/Δx` for each adjacent pair of points.
///
/// The output has one value fewer than the inputs; inputs with fewer than
/// two points yield an empty result.
pub fn gradient(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    if xs.len() != ys.len() {
        return Err(ProfileError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    xs.windows(2)
        .zip(ys.windows(2))
        .enumerate()
        .map(|(index, (x, y))| {
            let dx = x[1] - x[0];
            if dx == 0.0 {
                return Err(ProfileError::DegenerateInterval { index });
            }
            Ok((y[1] - y[0]) / dx)
        })
        .collect()
}

/// Colour band a slope falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientTier {
    /// Slope below 0.
    Downhill,
    /// Slope in [0, 0.1).
    Easy,
    /// Slope in [0.1, 0.2).
    Moderate,
    /// Slope of 0.2 and above.
    Steep,
}

impl GradientTier {
    /// Lower bound of the moderate tier.
    pub const MODERATE_FROM: f64 = 0.1;
    /// Lower bound of the steep tier.
    pub const STEEP_FROM: f64 = 0.2;

    /// Classify a slope (rise over run, not percent).
    pub fn classify(slope: f64) -> Self {
        if slope < 0.0 {
            GradientTier::Downhill
        } else if slope < Self::MODERATE_FROM {
            GradientTier::Easy
        } else if slope < Self::STEEP_FROM {
            GradientTier::Moderate
        } else {
            GradientTier::Steep
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradientTier::Downhill => "downhill",
            GradientTier::Easy => "easy",
            GradientTier::Moderate => "moderate",
            GradientTier::Steep => "steep",
        }
    }
}

//! Fixed-interval resampling of a (distance, elevation) series.

use crate::{ProfileError, Result};

/// Values `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Piecewise-linear interpolation of `ys` over non-decreasing `xs`.
#[derive(Debug, Clone)]
pub struct Interpolator<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
}

impl<'a> Interpolator<'a> {
    /// Create an interpolator. `xs` must be non-decreasing with at least two
    /// distinct values.
    pub fn new(xs: &'a [f64], ys: &'a [f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(ProfileError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(ProfileError::InvalidParameter(format!(
                "interpolation needs at least 2 points, got {}",
                xs.len()
            )));
        }
        if let Some(i) = xs.windows(2).position(|w| !(w[1] >= w[0])) {
            return Err(ProfileError::InvalidParameter(format!(
                "x-values decrease at index {}",
                i + 1
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Interpolated value at `x`, or `None` outside `[xs[0], xs[last]]`.
    pub fn at(&self, x: f64) -> Option<f64> {
        let last = self.xs.len() - 1;
        if x < self.xs[0] || x > self.xs[last] {
            return None;
        }
        // First index whose x is strictly greater than the target
        let hi = self.xs.partition_point(|&v| v <= x);
        if hi > last {
            return Some(self.ys[last]);
        }
        let lo = hi - 1;
        let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
        Some(self.ys[lo] + t * (self.ys[hi] - self.ys[lo]))
    }
}

/// Resample a profile every `step` along x, from its first x up to (but not
/// including) its last.
///
/// Returns the sample positions and the interpolated values.
pub fn resample(xs: &[f64], ys: &[f64], step: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if !(step > 0.0) {
        return Err(ProfileError::InvalidParameter(format!(
            "resampling step must be positive, got {}",
            step
        )));
    }
    let interp = Interpolator::new(xs, ys)?;
    let positions = arange(xs[0], xs[xs.len() - 1], step);
    let values = positions
        .iter()
        .map(|&x| {
            interp.at(x).ok_or_else(|| {
                ProfileError::InvalidParameter(format!("position {} outside profile", x))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok((positions, values))
}

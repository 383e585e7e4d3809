//! Repeated five-point moving average for noisy elevation profiles.

use crate::{ProfileError, Result};

/// Width of the moving-average window.
pub const SMOOTHING_WINDOW: usize = 5;

/// Smooth `values` with `passes` rounds of a five-point moving average.
///
/// Each pass averages every full window (`len - 4` values) and pads the
/// result back to the input length by repeating the first two and last two
/// averages. With a single window its average fills the whole output.
/// Passes compound. Zero passes returns the input unchanged.
pub fn smooth(values: &[f64], passes: usize) -> Result<Vec<f64>> {
    if passes > 0 && values.len() < SMOOTHING_WINDOW {
        return Err(ProfileError::WindowTooLarge {
            window: SMOOTHING_WINDOW,
            len: values.len(),
        });
    }

    let mut current = values.to_vec();
    for _ in 0..passes {
        current = smooth_once(&current);
    }
    Ok(current)
}

fn smooth_once(values: &[f64]) -> Vec<f64> {
    let averages: Vec<f64> = values
        .windows(SMOOTHING_WINDOW)
        .map(|w| w.iter().sum::<f64>() / SMOOTHING_WINDOW as f64)
        .collect();
    let last = averages.len() - 1;

    let mut out = Vec::with_capacity(values.len());
    out.push(averages[0]);
    out.push(averages[1.min(last)]);
    out.extend_from_slice(&averages);
    out.push(averages[last.saturating_sub(1)]);
    out.push(averages[last]);
    out
}

//! Error types for profile and grid computation.

use segcomp_dem::DemError;
use thiserror::Error;

/// Errors that can occur while building profiles, bands or grids.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Smoothing was asked for on a sequence shorter than its window.
    #[error("Smoothing window of {window} needs at least {window} values, got {len}")]
    WindowTooLarge {
        /// Window width.
        window: usize,
        /// Length of the input sequence.
        len: usize,
    },

    /// Two adjacent x-values are equal, so the slope is undefined.
    #[error("Zero-length interval starting at index {index}")]
    DegenerateInterval {
        /// Index of the first x-value of the interval.
        index: usize,
    },

    /// Paired sequences have different lengths.
    #[error("Length mismatch: {xs} x-values but {ys} y-values")]
    LengthMismatch {
        /// Number of x-values.
        xs: usize,
        /// Number of y-values.
        ys: usize,
    },

    /// A route without any points.
    #[error("Route has no points")]
    EmptyRoute,

    /// Invalid input parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Elevation lookup failed.
    #[error("Elevation lookup failed")]
    Elevation(#[from] DemError),
}

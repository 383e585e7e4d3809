//! # segcomp-profile
//!
//! The numeric core of segcomp: everything between elevation samples and
//! the shapes a renderer draws.
//!
//! - [`cumulative_distance_m`] and [`gradient`] turn a route into distances
//!   and slopes.
//! - [`smooth`] removes sampling noise from elevation profiles.
//! - [`ComparisonBuilder`] resamples profiles and stacks gradient bands for a
//!   comparison chart.
//! - [`build_grid`], [`contour_levels`] and [`march_squares`] produce the
//!   data behind contour maps.
//!
//! All elevation lookups go through [`segcomp_dem::ElevationProvider`], so
//! any of this can run against a synthetic surface.

mod bands;
mod contour;
mod distance;
mod error;
mod gradient;
mod grid;
mod profile;
mod resample;
mod smooth;

pub use bands::{
    Band, BandStacker, ComparisonBuilder, ProfileChart, DEFAULT_SECTION_LENGTH_M,
    STACK_CLEARANCE_M,
};
pub use contour::{contour_levels, march_squares, ContourSegment};
pub use distance::cumulative_distance_m;
pub use error::ProfileError;
pub use gradient::{gradient, GradientTier};
pub use grid::{build_grid, ElevationGrid, GridBounds, Mesh, MIN_MARGIN_DEG, SAMPLES_PER_DEGREE};
pub use profile::ElevationProfile;
pub use resample::{arange, linspace, resample, Interpolator};
pub use smooth::{smooth, SMOOTHING_WINDOW};

/// Result type for profile and grid operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

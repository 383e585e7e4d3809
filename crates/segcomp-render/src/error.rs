//! Error types for rendering.

use plotters::drawing::DrawingAreaErrorKind;
use segcomp_profile::ProfileError;
use thiserror::Error;

/// Errors that can occur while rendering charts and maps.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing backend reported an error.
    #[error("Drawing failed: {0}")]
    Draw(String),

    /// There was nothing to put on the canvas.
    #[error("Nothing to draw: {0}")]
    NothingToDraw(String),

    /// Preparing contour data failed.
    #[error("Contour preparation failed")]
    Profile(#[from] ProfileError),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

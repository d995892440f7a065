use thiserror::Error;

/// Errors originating from view-state validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid zoom: {0} (must be positive and finite)")]
    InvalidZoom(f64),

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid surface dimensions: {width}×{height} (allowed 400–2000 px per side)")]
    InvalidDimensions { width: u32, height: u32 },
}

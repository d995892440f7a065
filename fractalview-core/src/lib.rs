pub mod error;
pub mod mapper;
pub mod view;

// Re-export primary types for convenience.
pub use error::CoreError;
pub use mapper::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
pub use view::{ViewState, MAX_SURFACE, MAX_ZOOM, MIN_SURFACE, MIN_ZOOM};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;

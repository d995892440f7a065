pub mod error;
pub mod export;
pub mod frame;
pub mod grid;
pub mod palette;
pub mod present;
pub mod renderer;

pub use error::RenderError;
pub use export::export_png;
pub use frame::FrameBuffer;
pub use grid::IterationGrid;
pub use palette::{ColorLut, FALLBACK_COLOR, IN_SET_COLOR};
pub use present::{FrameSlot, PresentTarget};
pub use renderer::render_grid;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;

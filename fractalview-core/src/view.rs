use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Smallest accepted zoom scale.  Below this the visible plane extent per
/// pixel blows up towards `f64` range limits.
pub const MIN_ZOOM: f64 = 1e-9;

/// Largest accepted zoom scale.  Beyond this `1/(zoom * width)` drops under
/// `f64` precision and adjacent pixels collapse onto the same plane point.
pub const MAX_ZOOM: f64 = 1e14;

/// Smallest accepted display surface side, in pixels.
pub const MIN_SURFACE: u32 = 400;

/// Largest accepted display surface side, in pixels.
pub const MAX_SURFACE: u32 = 2000;

/// The tuple of center coordinates, zoom, iteration ceiling, and surface
/// dimensions that fully determines what is requested and displayed.
///
/// `zoom` is a unit-less scale multiplier: plane-units-per-pixel is
/// `1/(zoom * width)`, so increasing zoom shrinks the visible plane extent.
///
/// `ViewState` is a value type: every mutation produces a new value, and no
/// component holds a long-lived mutable reference to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewState {
    /// Create a view state with explicit parameters, validating all ranges.
    pub fn new(
        center_x: f64,
        center_y: f64,
        zoom: f64,
        max_iterations: u32,
        width: u32,
        height: u32,
    ) -> crate::Result<Self> {
        let view = Self {
            center_x,
            center_y,
            zoom,
            max_iterations,
            width,
            height,
        };
        view.validate()?;
        Ok(view)
    }

    /// Default view: the full Mandelbrot set centred slightly left of origin.
    pub fn initial() -> Self {
        Self {
            center_x: -0.65,
            center_y: 0.0,
            zoom: 0.4,
            max_iterations: 150,
            width: 800,
            height: 800,
        }
    }

    /// Check all invariants: positive finite zoom within the supported
    /// magnification range, at least one iteration, and surface dimensions
    /// within the sane range.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.zoom.is_finite() || self.zoom < MIN_ZOOM || self.zoom > MAX_ZOOM {
            return Err(CoreError::InvalidZoom(self.zoom));
        }
        if self.max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(self.max_iterations));
        }
        if self.width < MIN_SURFACE
            || self.width > MAX_SURFACE
            || self.height < MIN_SURFACE
            || self.height > MAX_SURFACE
        {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Replace the iteration ceiling, leaving everything else untouched.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

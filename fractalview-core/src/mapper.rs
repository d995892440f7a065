use crate::view::{ViewState, MAX_ZOOM, MIN_ZOOM};

/// Wheel-up magnification per tick.
pub const ZOOM_IN_FACTOR: f64 = 1.2;

/// Wheel-down reduction per tick.  Deliberately not the exact reciprocal of
/// [`ZOOM_IN_FACTOR`]; the slight bias towards zooming in is preserved from
/// the original interaction tuning.
pub const ZOOM_OUT_FACTOR: f64 = 0.8333;

/// The screen↔plane coordinate transform.
///
/// All methods are pure functions of the view state and their arguments;
/// navigation produces a new `ViewState` rather than mutating in place.
impl ViewState {
    /// Map a pixel coordinate on the display surface to a plane coordinate.
    ///
    /// `(0, 0)` is the top-left pixel; the surface center projects onto
    /// `(center_x, center_y)`.
    #[inline]
    pub fn pixel_to_plane(&self, px: f64, py: f64) -> (f64, f64) {
        let x = (px - self.width as f64 / 2.0) / (self.zoom * self.width as f64) + self.center_x;
        let y = (py - self.height as f64 / 2.0) / (self.zoom * self.height as f64) + self.center_y;
        (x, y)
    }

    /// Map a plane coordinate back to a (fractional) pixel coordinate.
    #[inline]
    pub fn plane_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let px = (x - self.center_x) * self.zoom * self.width as f64 + self.width as f64 / 2.0;
        let py = (y - self.center_y) * self.zoom * self.height as f64 + self.height as f64 / 2.0;
        (px, py)
    }

    /// Zoom by `factor` keeping the plane point under the cursor fixed.
    ///
    /// The plane coordinate projecting onto `(px, py)` before the zoom still
    /// projects onto `(px, py)` afterwards.  Factors that would push the zoom
    /// outside the supported range are clamped, in which case the cursor
    /// invariant still holds for the clamped factor.
    pub fn zoom_at(&self, px: f64, py: f64, factor: f64) -> Self {
        let (plane_x, plane_y) = self.pixel_to_plane(px, py);
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        // Solve for the center that keeps (plane_x, plane_y) under the cursor.
        let center_x =
            plane_x - (px - self.width as f64 / 2.0) / (new_zoom * self.width as f64);
        let center_y =
            plane_y - (py - self.height as f64 / 2.0) / (new_zoom * self.height as f64);

        Self {
            center_x,
            center_y,
            zoom: new_zoom,
            ..*self
        }
    }

    /// Pan by a pixel delta.
    ///
    /// The sign is inverted because dragging right moves the visible window
    /// left: the content follows the cursor.
    pub fn pan_by(&self, dx_pixels: f64, dy_pixels: f64) -> Self {
        let plane_dx = -dx_pixels / (self.zoom * self.width as f64);
        let plane_dy = -dy_pixels / (self.zoom * self.height as f64);
        Self {
            center_x: self.center_x + plane_dx,
            center_y: self.center_y + plane_dy,
            ..*self
        }
    }
}

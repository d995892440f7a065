/// Color reserved for points presumed inside the set (the last LUT entry).
pub const IN_SET_COLOR: [u8; 3] = [0, 0, 0];

/// Color used for iteration counts beyond the current LUT length.
///
/// Out-of-range counts can occur transiently when `max_iterations` changed
/// between request issue and palette rebuild; they must degrade to a defined
/// color rather than fault.
pub const FALLBACK_COLOR: [u8; 3] = [0, 0, 0];

/// A color lookup table indexed by iteration count.
///
/// Built once per iteration ceiling so that per-pixel rendering is a table
/// lookup, not a recomputation.  Entries `0..max_iterations` sweep a
/// four-band cyan/blue/purple/magenta gradient; entry `max_iterations` is
/// black for points that never escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLut {
    max_iterations: u32,
    colors: Vec<[u8; 3]>,
}

impl ColorLut {
    /// Build the table for a given iteration ceiling.
    ///
    /// Pure and deterministic: identical input always yields an identical
    /// table, so callers may memoize keyed on `max_iterations`.
    pub fn build(max_iterations: u32) -> Self {
        let mut colors = Vec::with_capacity(max_iterations as usize + 1);
        for i in 0..max_iterations {
            let t = i as f64 / max_iterations as f64;
            colors.push(band_color(t));
        }
        colors.push(IN_SET_COLOR);
        Self {
            max_iterations,
            colors,
        }
    }

    /// The iteration ceiling this table was built for.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Number of entries (`max_iterations + 1`).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color for an iteration count, degrading to [`FALLBACK_COLOR`]
    /// when the count is beyond the table.
    #[inline]
    pub fn color_for(&self, iterations: u32) -> [u8; 3] {
        self.colors
            .get(iterations as usize)
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Direct entry access for inspection.
    pub fn entry(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }
}

/// Map a normalized index `t ∈ [0, 1)` onto the four-band gradient.
///
/// Band boundaries and per-band endpoints: deep cyan → bright cyan →
/// electric blue → deep purple → magenta glow.
fn band_color(t: f64) -> [u8; 3] {
    let band = (t * 4.0).floor() as u32 % 4;
    let local_t = (t * 4.0).fract();
    let (r, g, b) = match band {
        0 => (
            local_t * 20.0,
            50.0 + local_t * 200.0,
            150.0 + local_t * 105.0,
        ),
        1 => (20.0 + local_t * 20.0, 250.0 - local_t * 100.0, 255.0),
        2 => (
            40.0 + local_t * 100.0,
            150.0 - local_t * 130.0,
            255.0 - local_t * 55.0,
        ),
        _ => (
            140.0 + local_t * 100.0,
            20.0 + local_t * 30.0,
            200.0 - local_t * 50.0,
        ),
    };
    [r.round() as u8, g.round() as u8, b.round() as u8]
}

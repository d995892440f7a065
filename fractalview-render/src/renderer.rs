use rayon::prelude::*;
use tracing::debug;

use crate::frame::FrameBuffer;
use crate::grid::IterationGrid;
use crate::palette::ColorLut;

/// Map each destination index to the source cell whose block covers it.
///
/// Source cell `g` owns the destination range
/// `[floor(g * scale), floor((g+1) * scale))` with `scale = dst/src`.  The
/// last cell's end is pinned to `dst`: in exact arithmetic
/// `floor(src * scale)` is `dst`, but `f64` rounding can land one short
/// (61/7 is the classic case).  Consecutive ranges share boundaries, so the
/// union partitions `[0, dst)` exactly for both up- and downscaling.
fn block_map(src: u32, dst: u32) -> Vec<u32> {
    let scale = dst as f64 / src as f64;
    let mut map = vec![0u32; dst as usize];
    for g in 0..src {
        let start = (g as f64 * scale).floor() as usize;
        let end = if g + 1 == src {
            dst as usize
        } else {
            (((g + 1) as f64) * scale).floor() as usize
        };
        for slot in &mut map[start..end.min(dst as usize)] {
            *slot = g;
        }
    }
    map
}

/// Paint an iteration grid onto a surface with nearest-neighbor block fill.
///
/// Each source cell colors its destination rectangle with the LUT entry for
/// its iteration count; no interpolation.  Counts beyond the LUT degrade to
/// the fallback color.  Rendering the same grid twice produces the same
/// pixel buffer.
///
/// Returns `None` for an empty grid or a zero-sized surface, which is an
/// expected transient state, not a fault.
pub fn render_grid(
    grid: &IterationGrid,
    lut: &ColorLut,
    surface_width: u32,
    surface_height: u32,
) -> Option<FrameBuffer> {
    if grid.is_empty() || surface_width == 0 || surface_height == 0 {
        return None;
    }

    let col_of = block_map(grid.width, surface_width);
    let row_of = block_map(grid.height, surface_height);

    let mut frame = FrameBuffer::new(surface_width, surface_height);
    let stride = surface_width as usize * 4;
    frame
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = row_of[y] as usize * grid.width as usize;
            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let count = grid.data[src_row + col_of[x] as usize];
                let color = lut.color_for(count);
                pixel[0] = color[0];
                pixel[1] = color[1];
                pixel[2] = color[2];
                pixel[3] = 255;
            }
        });

    debug!(
        grid_w = grid.width,
        grid_h = grid.height,
        surface_w = surface_width,
        surface_h = surface_height,
        "blitted grid to surface"
    );
    Some(frame)
}

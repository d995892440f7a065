use crate::error::RenderError;

/// A rectangular array of per-sample escape-iteration counts.
///
/// Row-major, produced by the compute service for one request.  Dimensions
/// may differ from the display surface; the renderer resamples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

impl IterationGrid {
    /// Build a grid from the wire format's nested rows.
    ///
    /// All rows must have the same length; a ragged response is rejected.
    /// An empty row set yields an empty grid, which the renderer treats as
    /// a no-op rather than an error.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> crate::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(RenderError::RaggedGrid {
                    row: row_idx,
                    expected: width,
                    got: row.len(),
                });
            }
            data.extend_from_slice(&row);
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            data,
        })
    }

    /// A grid with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: u32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// The iteration count at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_builds_row_major() {
        let grid = IterationGrid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.data, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.get(2, 1), Some(6));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = IterationGrid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::RaggedGrid {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn empty_rows_yield_empty_grid() {
        let grid = IterationGrid::from_rows(vec![]).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.data.len(), 0);
    }
}

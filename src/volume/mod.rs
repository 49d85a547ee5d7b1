//! Response volumes over `(row, col, level)`.
//!
//! `VolumeView` is a borrowed, read-only view of a dense `f64` buffer with shape
//! `(rows, cols, levels)` in row-major order. The responses of all scale levels
//! of one pixel are contiguous, so a scale-axis lookup touches a single short
//! slice: `index = (row * cols + col) * levels + level`.

use crate::candidate::CubeCoord;
use crate::kernel::is_scale_maximum;
use crate::util::{ScaleMaxError, ScaleMaxResult};

mod owned;

pub use owned::Volume;

/// Borrowed 3-D response volume.
#[derive(Copy, Clone, Debug)]
pub struct VolumeView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
    levels: usize,
}

/// Response of a candidate together with its existing scale neighbors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleNeighbors {
    /// Response at the candidate coordinate.
    pub response: f64,
    /// Response one level below, absent on the first level.
    pub lower: Option<f64>,
    /// Response one level above, absent on the last level.
    pub upper: Option<f64>,
}

impl ScaleNeighbors {
    /// Returns true when the response strictly exceeds every existing neighbor.
    pub fn is_scale_maximum(&self) -> bool {
        is_scale_maximum(self.response, self.lower, self.upper)
    }
}

impl<'a> VolumeView<'a> {
    /// Creates a view over `data` with shape `(rows, cols, levels)`.
    ///
    /// Extra trailing elements in `data` are ignored.
    pub fn new(data: &'a [f64], rows: usize, cols: usize, levels: usize) -> ScaleMaxResult<Self> {
        let needed = required_len(rows, cols, levels)?;
        if data.len() < needed {
            return Err(ScaleMaxError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            levels,
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of scale levels.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Returns `(rows, cols, levels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.levels)
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Returns true when `coord` addresses an element of the volume.
    pub fn contains(&self, coord: CubeCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols && coord.level < self.levels
    }

    /// Returns the response at `(row, col, level)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize, level: usize) -> Option<f64> {
        if level >= self.levels {
            return None;
        }
        self.scale_column(row, col).map(|column| column[level])
    }

    /// Returns the responses of all scale levels at pixel `(row, col)`.
    pub fn scale_column(&self, row: usize, col: usize) -> Option<&'a [f64]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let start = (row * self.cols + col) * self.levels;
        self.data.get(start..start + self.levels)
    }

    /// Returns the response at `coord` with its existing scale neighbors.
    pub fn scale_neighbors(&self, coord: CubeCoord) -> Option<ScaleNeighbors> {
        if coord.level >= self.levels {
            return None;
        }
        let column = self.scale_column(coord.row, coord.col)?;
        let level = coord.level;
        Some(ScaleNeighbors {
            response: column[level],
            lower: level.checked_sub(1).map(|l| column[l]),
            upper: column.get(level + 1).copied(),
        })
    }

    /// Verifies that every candidate lies inside the volume.
    ///
    /// Reports the first offending candidate.
    pub fn check_candidates(&self, candidates: &[CubeCoord]) -> ScaleMaxResult<()> {
        match candidates.iter().position(|&coord| !self.contains(coord)) {
            Some(index) => Err(self.out_of_bounds(index, candidates[index])),
            None => Ok(()),
        }
    }

    pub(crate) fn out_of_bounds(&self, index: usize, coord: CubeCoord) -> ScaleMaxError {
        ScaleMaxError::CandidateOutOfBounds {
            index,
            row: coord.row,
            col: coord.col,
            level: coord.level,
            rows: self.rows,
            cols: self.cols,
            levels: self.levels,
        }
    }

    /// Flat offset of the first level of `coord`'s pixel. Caller checks bounds.
    #[inline]
    pub(crate) fn column_start(&self, coord: CubeCoord) -> usize {
        (coord.row * self.cols + coord.col) * self.levels
    }
}

pub(super) fn required_len(rows: usize, cols: usize, levels: usize) -> ScaleMaxResult<usize> {
    let invalid = ScaleMaxError::InvalidDimensions { rows, cols, levels };
    if rows == 0 || cols == 0 || levels == 0 {
        return Err(invalid);
    }
    rows.checked_mul(cols)
        .and_then(|v| v.checked_mul(levels))
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::VolumeView;
    use crate::candidate::CubeCoord;
    use crate::util::ScaleMaxError;

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|v| v as f64).collect()
    }

    #[test]
    fn indexing_is_row_major_with_contiguous_levels() {
        let data = ramp(2 * 3 * 4);
        let view = VolumeView::new(&data, 2, 3, 4).unwrap();
        assert_eq!(view.get(0, 0, 0), Some(0.0));
        assert_eq!(view.get(0, 0, 3), Some(3.0));
        assert_eq!(view.get(0, 1, 0), Some(4.0));
        assert_eq!(view.get(1, 2, 3), Some(23.0));
        assert_eq!(view.get(2, 0, 0), None);
        assert_eq!(view.get(0, 0, 4), None);
        assert_eq!(view.scale_column(1, 0).unwrap(), &[12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    fn scale_neighbors_omit_missing_levels() {
        let data = ramp(3);
        let view = VolumeView::new(&data, 1, 1, 3).unwrap();

        let first = view.scale_neighbors(CubeCoord::new(0, 0, 0)).unwrap();
        assert_eq!(first.lower, None);
        assert_eq!(first.upper, Some(1.0));

        let middle = view.scale_neighbors(CubeCoord::new(0, 0, 1)).unwrap();
        assert_eq!(middle.lower, Some(0.0));
        assert_eq!(middle.response, 1.0);
        assert_eq!(middle.upper, Some(2.0));

        let last = view.scale_neighbors(CubeCoord::new(0, 0, 2)).unwrap();
        assert_eq!(last.lower, Some(1.0));
        assert_eq!(last.upper, None);
        assert!(last.is_scale_maximum());

        assert!(view.scale_neighbors(CubeCoord::new(0, 0, 3)).is_none());
    }

    #[test]
    fn check_candidates_reports_first_offender() {
        let data = ramp(8);
        let view = VolumeView::new(&data, 2, 2, 2).unwrap();
        let candidates = [
            CubeCoord::new(1, 1, 1),
            CubeCoord::new(0, 2, 0),
            CubeCoord::new(5, 0, 0),
        ];
        let err = view.check_candidates(&candidates).unwrap_err();
        assert_eq!(
            err,
            ScaleMaxError::CandidateOutOfBounds {
                index: 1,
                row: 0,
                col: 2,
                level: 0,
                rows: 2,
                cols: 2,
                levels: 2,
            }
        );
        assert!(view.check_candidates(&candidates[..1]).is_ok());
    }
}

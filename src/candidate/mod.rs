//! Candidate coordinates into a response volume.

/// Integer coordinate `(row, col, level)` of a candidate scale-space point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeCoord {
    /// Row (y) coordinate.
    pub row: usize,
    /// Column (x) coordinate.
    pub col: usize,
    /// Scale level, starting from the smallest sigma.
    pub level: usize,
}

impl CubeCoord {
    /// Creates a coordinate from its components.
    pub const fn new(row: usize, col: usize, level: usize) -> Self {
        Self { row, col, level }
    }
}

impl From<[usize; 3]> for CubeCoord {
    fn from([row, col, level]: [usize; 3]) -> Self {
        Self { row, col, level }
    }
}

impl From<(usize, usize, usize)> for CubeCoord {
    fn from((row, col, level): (usize, usize, usize)) -> Self {
        Self { row, col, level }
    }
}

impl From<CubeCoord> for [usize; 3] {
    fn from(coord: CubeCoord) -> Self {
        [coord.row, coord.col, coord.level]
    }
}

/// Keeps the candidates whose mask entry is set, in input order.
pub(crate) fn select_by_mask(candidates: &[CubeCoord], mask: &[bool]) -> Vec<CubeCoord> {
    debug_assert_eq!(candidates.len(), mask.len());
    candidates
        .iter()
        .zip(mask)
        .filter_map(|(&coord, &keep)| keep.then_some(coord))
        .collect()
}

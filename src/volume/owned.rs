//! Owned response volume buffer.

use crate::util::{ScaleMaxError, ScaleMaxResult};
use crate::volume::{required_len, VolumeView};

/// Owned contiguous `(rows, cols, levels)` response volume.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    levels: usize,
}

impl Volume {
    /// Wraps a row-major buffer whose length must equal `rows * cols * levels`.
    pub fn from_vec(
        data: Vec<f64>,
        rows: usize,
        cols: usize,
        levels: usize,
    ) -> ScaleMaxResult<Self> {
        let needed = required_len(rows, cols, levels)?;
        if data.len() < needed {
            return Err(ScaleMaxError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ScaleMaxError::BufferLengthMismatch {
                expected: needed,
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

    /// Stacks `rows x cols` row-major layers along the scale axis.
    ///
    /// Layer `i` becomes scale level `i`.
    pub fn from_layers<L>(layers: &[L], rows: usize, cols: usize) -> ScaleMaxResult<Self>
    where
        L: AsRef<[f64]>,
    {
        let levels = layers.len();
        if rows == 0 || cols == 0 || levels == 0 {
            return Err(ScaleMaxError::InvalidDimensions { rows, cols, levels });
        }
        let pixels = rows
            .checked_mul(cols)
            .ok_or(ScaleMaxError::InvalidDimensions { rows, cols, levels })?;
        for (layer, values) in layers.iter().enumerate() {
            let got = values.as_ref().len();
            if got != pixels {
                return Err(ScaleMaxError::LayerSizeMismatch {
                    layer,
                    expected: pixels,
                    got,
                });
            }
        }

        let mut data = Vec::with_capacity(pixels * levels);
        for pixel in 0..pixels {
            data.extend(layers.iter().map(|values| values.as_ref()[pixel]));
        }
        Self::from_vec(data, rows, cols, levels)
    }

    /// Returns a borrowed view of the volume.
    pub fn view(&self) -> VolumeView<'_> {
        VolumeView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            levels: self.levels,
        }
    }

    /// Returns the row-major backing buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns `(rows, cols, levels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.levels)
    }

    /// Consumes the volume and returns its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

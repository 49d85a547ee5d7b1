//! Scalar reference kernel.
//!
//! Walks the candidates one by one with direct lookups into the scale column
//! of each pixel. This is the baseline the other kernels are validated
//! against.

use crate::candidate::CubeCoord;
use crate::kernel::ScaleMaxKernel;
use crate::trace::{filter_span, trace_event};
use crate::util::ScaleMaxResult;
use crate::volume::VolumeView;

/// Per-candidate branching filter.
pub struct ScalarKernel;

impl ScaleMaxKernel for ScalarKernel {
    fn filter(
        volume: VolumeView<'_>,
        candidates: &[CubeCoord],
    ) -> ScaleMaxResult<Vec<CubeCoord>> {
        let _span = filter_span!("scalar", candidates.len()).entered();

        let last_level = volume.levels() - 1;
        let mut accepted = Vec::new();
        for (index, &coord) in candidates.iter().enumerate() {
            let column = match volume.scale_column(coord.row, coord.col) {
                Some(column) if coord.level <= last_level => column,
                _ => return Err(volume.out_of_bounds(index, coord)),
            };
            let level = coord.level;
            let response = column[level];

            // Check the level under the current one
            if level != 0 && column[level - 1] >= response {
                continue;
            }
            // Check the level above the current one
            if level != last_level && column[level + 1] >= response {
                continue;
            }
            accepted.push(coord);
        }

        trace_event!("accepted", count = accepted.len());
        Ok(accepted)
    }
}

//! Bulk gather-and-compare kernel.
//!
//! Instead of branching per candidate, the filter runs as a sequence of whole
//! array passes: gather the candidate responses, gather the lower and upper
//! neighbor responses, compare the arrays into a mask and select.
//!
//! Missing neighbors (first and last level) are gathered as NaN. Since
//! `NaN >= v` is false for every `v`, the placeholder never rejects a
//! candidate, which keeps the comparison pass free of boundary branches.

use crate::candidate::{select_by_mask, CubeCoord};
use crate::kernel::ScaleMaxKernel;
use crate::trace::{filter_span, trace_event};
use crate::util::ScaleMaxResult;
use crate::volume::VolumeView;

/// Placeholder response for a neighbor level that does not exist.
pub(crate) const MISSING_NEIGHBOR: f64 = f64::NAN;

/// Responses gathered for a batch of in-bounds candidates.
pub(crate) struct ScaleGather {
    pub(crate) responses: Vec<f64>,
    pub(crate) lowers: Vec<f64>,
    pub(crate) uppers: Vec<f64>,
}

impl ScaleGather {
    /// Gathers candidate and neighbor responses. Candidates must be in bounds.
    pub(crate) fn collect(volume: VolumeView<'_>, candidates: &[CubeCoord]) -> Self {
        let data = volume.as_slice();
        let last_level = volume.levels() - 1;

        let responses = candidates
            .iter()
            .map(|&coord| data[volume.column_start(coord) + coord.level])
            .collect();
        let lowers = candidates
            .iter()
            .map(|&coord| match coord.level {
                0 => MISSING_NEIGHBOR,
                level => data[volume.column_start(coord) + level - 1],
            })
            .collect();
        let uppers = candidates
            .iter()
            .map(|&coord| {
                if coord.level == last_level {
                    MISSING_NEIGHBOR
                } else {
                    data[volume.column_start(coord) + coord.level + 1]
                }
            })
            .collect();

        Self {
            responses,
            lowers,
            uppers,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.responses.len()
    }
}

/// Compares gathered neighbors against responses; `true` keeps the candidate.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn compare_mask(gather: &ScaleGather) -> Vec<bool> {
    debug_assert!(gather.lowers.len() == gather.len() && gather.uppers.len() == gather.len());
    let lower_ok = gather
        .lowers
        .iter()
        .zip(&gather.responses)
        .map(|(&lower, &response)| !(lower >= response));
    let upper_ok = gather
        .uppers
        .iter()
        .zip(&gather.responses)
        .map(|(&upper, &response)| !(upper >= response));
    lower_ok.zip(upper_ok).map(|(lo, hi)| lo & hi).collect()
}

/// Array-at-a-time filter.
pub struct BulkKernel;

impl ScaleMaxKernel for BulkKernel {
    fn filter(
        volume: VolumeView<'_>,
        candidates: &[CubeCoord],
    ) -> ScaleMaxResult<Vec<CubeCoord>> {
        let _span = filter_span!("bulk", candidates.len()).entered();

        volume.check_candidates(candidates)?;
        let gather = ScaleGather::collect(volume, candidates);
        let mask = compare_mask(&gather);
        let accepted = select_by_mask(candidates, &mask);

        trace_event!("accepted", count = accepted.len());
        Ok(accepted)
    }
}

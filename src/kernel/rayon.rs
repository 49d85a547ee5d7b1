//! Rayon-parallel kernel (feature-gated).
//!
//! Evaluates the scalar predicate for all candidates in parallel and selects
//! the survivors in input order. Bounds are checked sequentially up front so
//! the reported error always names the first offending candidate.

use crate::candidate::{select_by_mask, CubeCoord};
use crate::kernel::ScaleMaxKernel;
use crate::trace::{filter_span, trace_event};
use crate::util::ScaleMaxResult;
use crate::volume::VolumeView;
use rayon::prelude::*;

/// Candidate-parallel filter.
pub struct ParallelKernel;

impl ScaleMaxKernel for ParallelKernel {
    fn filter(
        volume: VolumeView<'_>,
        candidates: &[CubeCoord],
    ) -> ScaleMaxResult<Vec<CubeCoord>> {
        let _span = filter_span!("parallel", candidates.len()).entered();

        volume.check_candidates(candidates)?;
        let mask: Vec<bool> = candidates
            .par_iter()
            .map(|&coord| {
                volume
                    .scale_neighbors(coord)
                    .is_some_and(|neighbors| neighbors.is_scale_maximum())
            })
            .collect();
        let accepted = select_by_mask(candidates, &mask);

        trace_event!("accepted", count = accepted.len());
        Ok(accepted)
    }
}

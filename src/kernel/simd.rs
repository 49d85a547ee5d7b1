//! SIMD bulk kernel using the `wide` crate.
//!
//! Shares the gather stage with [`BulkKernel`](crate::kernel::bulk::BulkKernel)
//! and vectorizes the comparison stage: four candidates are compared per
//! `f64x4` and the rejection bits are read back with `to_bitmask`.

use crate::candidate::{select_by_mask, CubeCoord};
use crate::kernel::bulk::{compare_mask, ScaleGather};
use crate::kernel::ScaleMaxKernel;
use crate::trace::{filter_span, trace_event};
use crate::util::ScaleMaxResult;
use crate::volume::VolumeView;
use wide::f64x4;

const LANES: usize = 4;

/// Load 4 f64 values into f64x4.
#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

/// Vectorized counterpart of [`compare_mask`].
fn compare_mask_simd(gather: &ScaleGather) -> Vec<bool> {
    let len = gather.len();
    let simd_end = len / LANES * LANES;
    let mut mask = Vec::with_capacity(len);

    let mut i = 0;
    while i < simd_end {
        let responses = load_f64x4(&gather.responses[i..]);
        let lowers = load_f64x4(&gather.lowers[i..]);
        let uppers = load_f64x4(&gather.uppers[i..]);

        // NaN placeholders compare false and never set a rejection bit
        let rejected = (lowers.simd_ge(responses) | uppers.simd_ge(responses)).to_bitmask();
        for lane in 0..LANES {
            mask.push(rejected & (1 << lane) == 0);
        }
        i += LANES;
    }

    if simd_end < len {
        let tail = ScaleGather {
            responses: gather.responses[simd_end..].to_vec(),
            lowers: gather.lowers[simd_end..].to_vec(),
            uppers: gather.uppers[simd_end..].to_vec(),
        };
        mask.extend(compare_mask(&tail));
    }
    mask
}

/// Bulk filter with a vectorized comparison stage.
pub struct BulkSimdKernel;

impl ScaleMaxKernel for BulkSimdKernel {
    fn filter(
        volume: VolumeView<'_>,
        candidates: &[CubeCoord],
    ) -> ScaleMaxResult<Vec<CubeCoord>> {
        let _span = filter_span!("bulk_simd", candidates.len()).entered();

        volume.check_candidates(candidates)?;
        let gather = ScaleGather::collect(volume, candidates);
        let mask = compare_mask_simd(&gather);
        let accepted = select_by_mask(candidates, &mask);

        trace_event!("accepted", count = accepted.len());
        Ok(accepted)
    }
}

//! Scale-axis local maximum kernels.
//!
//! Every kernel implements the same contract: keep the candidates whose
//! response strictly exceeds the responses directly below and above them on
//! the scale axis, preserving input order. Candidates on the first or last
//! level are only compared against the neighbor that exists.

use crate::candidate::CubeCoord;
use crate::util::ScaleMaxResult;
use crate::volume::VolumeView;

/// Kernel trait shared by all filter strategies.
pub trait ScaleMaxKernel {
    /// Returns the candidates that are local maxima along the scale axis.
    ///
    /// Fails on the first candidate outside the volume without returning a
    /// partial result.
    fn filter(
        volume: VolumeView<'_>,
        candidates: &[CubeCoord],
    ) -> ScaleMaxResult<Vec<CubeCoord>>;
}

/// Local-maximum predicate along the scale axis.
///
/// A neighbor rejects the candidate when `neighbor >= response`, so ties are
/// never maxima and missing neighbors impose no constraint.
#[inline]
pub fn is_scale_maximum(response: f64, lower: Option<f64>, upper: Option<f64>) -> bool {
    if let Some(lower) = lower {
        if lower >= response {
            return false;
        }
    }
    if let Some(upper) = upper {
        if upper >= response {
            return false;
        }
    }
    true
}

pub mod bulk;
pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(test)]
mod tests {
    use super::is_scale_maximum;

    #[test]
    fn ties_are_rejected() {
        assert!(!is_scale_maximum(5.0, Some(5.0), Some(1.0)));
        assert!(!is_scale_maximum(5.0, Some(1.0), Some(5.0)));
        assert!(!is_scale_maximum(5.0, Some(5.0), Some(5.0)));
    }

    #[test]
    fn missing_neighbors_impose_no_constraint() {
        assert!(is_scale_maximum(-3.0, None, None));
        assert!(is_scale_maximum(2.0, None, Some(1.0)));
        assert!(is_scale_maximum(2.0, Some(1.0), None));
        assert!(!is_scale_maximum(2.0, None, Some(3.0)));
    }

    #[test]
    fn nan_never_triggers_rejection() {
        assert!(is_scale_maximum(f64::NAN, Some(1.0), Some(1.0)));
        assert!(is_scale_maximum(1.0, Some(f64::NAN), None));
    }
}

//! Strategy selection for the scale-maxima filter.
//!
//! `Strategy` names one of the interchangeable kernels so callers (CLI,
//! bindings, benches) can pick one at runtime. Strategies backed by a
//! disabled cargo feature fall back to their portable counterpart, which
//! produces identical output.

use std::fmt;
use std::str::FromStr;

use crate::candidate::CubeCoord;
use crate::kernel::bulk::BulkKernel;
use crate::kernel::scalar::ScalarKernel;
use crate::kernel::ScaleMaxKernel;
use crate::trace::trace_event;
use crate::util::{ScaleMaxError, ScaleMaxResult};
use crate::volume::VolumeView;

/// Filter evaluation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Per-candidate loop with direct lookups.
    #[default]
    Scalar,
    /// Whole-array gather, compare and mask.
    Bulk,
    /// Bulk filter with a SIMD comparison stage (`simd` feature).
    BulkSimd,
    /// Candidate-parallel scalar predicate (`rayon` feature).
    Parallel,
}

impl Strategy {
    /// Returns every strategy in a stable order.
    pub const fn all() -> [Strategy; 4] {
        [
            Strategy::Scalar,
            Strategy::Bulk,
            Strategy::BulkSimd,
            Strategy::Parallel,
        ]
    }

    /// Returns the canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Scalar => "scalar",
            Strategy::Bulk => "bulk",
            Strategy::BulkSimd => "bulk_simd",
            Strategy::Parallel => "parallel",
        }
    }

    /// Returns the strategy that actually runs with the enabled features.
    pub fn resolved(self) -> Strategy {
        match self {
            Strategy::BulkSimd if !cfg!(feature = "simd") => Strategy::Bulk,
            Strategy::Parallel if !cfg!(feature = "rayon") => Strategy::Scalar,
            other => other,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ScaleMaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" => Ok(Strategy::Scalar),
            "bulk" | "vectorized" => Ok(Strategy::Bulk),
            "bulk_simd" | "simd" => Ok(Strategy::BulkSimd),
            "parallel" | "rayon" => Ok(Strategy::Parallel),
            _ => Err(ScaleMaxError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Filters `candidates` down to scale-axis local maxima using `strategy`.
pub fn filter_scale_maxima(
    volume: VolumeView<'_>,
    candidates: &[CubeCoord],
    strategy: Strategy,
) -> ScaleMaxResult<Vec<CubeCoord>> {
    let resolved = strategy.resolved();
    if resolved != strategy {
        trace_event!(
            "strategy_fallback",
            requested = strategy.name(),
            resolved = resolved.name()
        );
    }
    match resolved {
        Strategy::Scalar => ScalarKernel::filter(volume, candidates),
        Strategy::Bulk => BulkKernel::filter(volume, candidates),
        #[cfg(feature = "simd")]
        Strategy::BulkSimd => crate::kernel::simd::BulkSimdKernel::filter(volume, candidates),
        #[cfg(not(feature = "simd"))]
        Strategy::BulkSimd => BulkKernel::filter(volume, candidates),
        #[cfg(feature = "rayon")]
        Strategy::Parallel => crate::kernel::rayon::ParallelKernel::filter(volume, candidates),
        #[cfg(not(feature = "rayon"))]
        Strategy::Parallel => ScalarKernel::filter(volume, candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::Strategy;
    use crate::util::ScaleMaxError;

    #[test]
    fn names_round_trip_through_from_str() {
        for strategy in Strategy::all() {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert_eq!("Vectorized".parse::<Strategy>().unwrap(), Strategy::Bulk);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "gpu".parse::<Strategy>().unwrap_err();
        assert_eq!(err, ScaleMaxError::UnknownStrategy("gpu".to_string()));
    }

    #[test]
    fn disabled_features_fall_back() {
        assert_eq!(Strategy::Scalar.resolved(), Strategy::Scalar);
        assert_eq!(Strategy::Bulk.resolved(), Strategy::Bulk);
        let simd = Strategy::BulkSimd.resolved();
        assert_eq!(simd == Strategy::BulkSimd, cfg!(feature = "simd"));
        let parallel = Strategy::Parallel.resolved();
        assert_eq!(parallel == Strategy::Parallel, cfg!(feature = "rayon"));
    }
}

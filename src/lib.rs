//! scalemax filters scale-space blob candidates down to local maxima along the
//! scale axis of a Laplacian-of-Gaussian response volume.
//!
//! The crate provides a scalar reference kernel and a bulk gather/compare
//! kernel with identical output, plus optional SIMD (`simd` feature) and
//! parallel (`rayon` feature) variants. `util::timing` offers the scoped
//! wall-clock measurement used to compare them.

pub mod candidate;
pub mod kernel;
pub mod strategy;
mod trace;
pub mod util;
pub mod volume;

pub use candidate::CubeCoord;
pub use kernel::bulk::BulkKernel;
pub use kernel::scalar::ScalarKernel;
pub use kernel::{is_scale_maximum, ScaleMaxKernel};
pub use strategy::{filter_scale_maxima, Strategy};
pub use util::{format_duration, take_time, ScaleMaxError, ScaleMaxResult, ScopeTimer, Timing};
pub use volume::{ScaleNeighbors, Volume, VolumeView};

#[cfg(feature = "simd")]
pub use kernel::simd::BulkSimdKernel;

#[cfg(feature = "rayon")]
pub use kernel::rayon::ParallelKernel;

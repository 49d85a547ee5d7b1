//! Shared utility helpers.

pub mod error;
pub mod timing;

pub use error::{ScaleMaxError, ScaleMaxResult};
pub use timing::{format_duration, take_time, ScopeTimer, Timing};

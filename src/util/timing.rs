//! Scoped wall-clock timing for comparing filter strategies.
//!
//! `ScopeTimer` measures from construction to `stop`, and `take_time` wraps an
//! arbitrary closure with one. Durations are rendered with an automatically
//! chosen unit by `format_duration`.

use std::fmt;
use std::time::{Duration, Instant};

use crate::trace::trace_event;

/// Formats a duration in seconds with one decimal digit and a unit picked by
/// magnitude.
///
/// Values of at least one second (or exactly zero) are shown in seconds,
/// then milliseconds, microseconds and finally nanoseconds.
pub fn format_duration(seconds: f64) -> String {
    let (value, units) = if seconds >= 1.0 || seconds == 0.0 {
        (seconds, "s")
    } else if seconds >= 1e-3 {
        (seconds * 1e3, "ms")
    } else if seconds >= 1e-6 {
        (seconds * 1e6, "us")
    } else {
        (seconds * 1e9, "ns")
    };
    format!("{value:.1} {units}")
}

/// Elapsed time of one labelled measurement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    desc: String,
    elapsed: Duration,
}

impl Timing {
    /// Creates a timing record from a label and a measured duration.
    pub fn new(desc: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            desc: desc.into(),
            elapsed,
        }
    }

    /// Returns the label of the measurement.
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Returns the measured duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the measured duration in seconds.
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns the duration rendered by [`format_duration`].
    pub fn formatted(&self) -> String {
        format_duration(self.seconds())
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} took {}", self.desc, self.formatted())
    }
}

/// Measures wall-clock time from `start` until `stop`.
#[derive(Debug)]
pub struct ScopeTimer {
    desc: String,
    start: Instant,
}

impl ScopeTimer {
    /// Starts a new measurement labelled `desc`.
    pub fn start(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            start: Instant::now(),
        }
    }

    /// Stops the measurement and returns the elapsed time.
    pub fn stop(self) -> Timing {
        let timing = Timing::new(self.desc, self.start.elapsed());
        trace_event!(
            "timing",
            desc = timing.desc(),
            elapsed_s = timing.seconds()
        );
        timing
    }
}

/// Runs `op` inside a [`ScopeTimer`] and returns its output with the timing.
pub fn take_time<T, F>(desc: impl Into<String>, op: F) -> (T, Timing)
where
    F: FnOnce() -> T,
{
    let timer = ScopeTimer::start(desc);
    let out = op();
    (out, timer.stop())
}

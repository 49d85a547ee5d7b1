//! Instrumentation hooks for the filter kernels.
//!
//! Every kernel opens one `filter` span tagged with the kernel name and the
//! candidate count, and reports outcomes as info events whose message is the
//! event name. Without the `tracing` feature both macros reduce to evaluating
//! their arguments.

/// Opens the `filter` span for one kernel pass.
#[cfg(feature = "tracing")]
macro_rules! filter_span {
    ($kernel:literal, $candidates:expr) => {
        tracing::info_span!("filter", kernel = $kernel, candidates = $candidates)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! filter_span {
    ($kernel:literal, $candidates:expr) => {{
        let _ = $candidates;
        $crate::trace::DisabledSpan
    }};
}

/// Emits an info event carrying at least one field.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($message:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!($($key = $value,)+ $message)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($message:literal, $($key:ident = $value:expr),+ $(,)?) => {{
        $(let _ = &$value;)+
    }};
}

pub(crate) use filter_span;
pub(crate) use trace_event;

/// Guard returned by `filter_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_span, trace_event};

    #[test]
    fn macros_accept_kernel_fields() {
        let candidates = [1_u8, 2, 3];
        let _span = filter_span!("scalar", candidates.len()).entered();
        trace_event!("accepted", count = candidates.len(), level = 2_usize,);
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn disabled_macros_still_evaluate_arguments() {
        let calls = std::cell::Cell::new(0);
        let bump = || {
            calls.set(calls.get() + 1);
            calls.get()
        };
        let _span = filter_span!("bulk", bump()).entered();
        trace_event!("accepted", count = bump(), again = bump());
        assert_eq!(calls.get(), 3);
    }
}

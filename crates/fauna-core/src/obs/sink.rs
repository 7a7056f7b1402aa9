//! Metrics sink boundary.
//!
//! Pagination logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{error::ErrorClass, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    TraversalStart,
    PageFetched {
        elements: u64,
        has_before: bool,
        has_after: bool,
    },
    FetchFailed {
        class: ErrorClass,
    },
    TraversalFinish {
        pages: u64,
        elements: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that folds events into the shared counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::TraversalStart => metrics::with_state_mut(|c| {
                c.traversals_started = c.traversals_started.saturating_add(1);
            }),

            MetricsEvent::PageFetched {
                elements,
                has_before,
                has_after,
            } => metrics::with_state_mut(|c| {
                c.pages_fetched = c.pages_fetched.saturating_add(1);
                c.elements_fetched = c.elements_fetched.saturating_add(elements);
                if elements == 0 {
                    c.empty_pages = c.empty_pages.saturating_add(1);
                }
                if has_before && has_after {
                    c.pages_with_both_cursors = c.pages_with_both_cursors.saturating_add(1);
                }
            }),

            MetricsEvent::FetchFailed { class } => metrics::with_state_mut(|c| {
                c.traversals_failed = c.traversals_failed.saturating_add(1);
                match class {
                    ErrorClass::MalformedResponse => {
                        c.malformed_responses = c.malformed_responses.saturating_add(1);
                    }
                    _ => {
                        c.execution_failures = c.execution_failures.saturating_add(1);
                    }
                }
            }),

            MetricsEvent::TraversalFinish { pages, elements } => metrics::with_state_mut(|c| {
                c.traversals_finished = c.traversals_finished.saturating_add(1);
                c.longest_traversal_pages = c.longest_traversal_pages.max(pages);
                c.largest_traversal_elements = c.largest_traversal_elements.max(elements);
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current counters for this thread.
#[must_use]
pub fn metrics_report() -> metrics::PaginateCounters {
    metrics::with_state(Clone::clone)
}

/// Reset all counters for this thread.
pub fn metrics_reset_all() {
    metrics::reset();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

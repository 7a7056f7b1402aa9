//! Observability: pagination telemetry and sink abstractions.
//!
//! Traversal logic never touches counters directly; it emits
//! [`MetricsEvent`]s through the sink boundary.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::PaginateCounters;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};

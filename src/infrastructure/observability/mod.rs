//! Push-based observability for the price optimizer
//!
//! Metrics are kept in a Prometheus registry and pushed as structured JSON
//! logs to stdout by `MetricsReporter`. No HTTP endpoint serves them.

pub mod latency_tracker;
pub mod metrics;
pub mod reporter;

pub use latency_tracker::InvocationGuard;
pub use metrics::Metrics;
pub use reporter::MetricsReporter;

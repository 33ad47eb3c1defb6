//! Metrics collection and exposition.
//!
//! # Metrics
//! - `requests_total` (counter): handled requests by route
//! - `request_duration_seconds` (histogram): handler latency by route
//!
//! # Design Decisions
//! - Handlers record through the `ObservationSink` trait so the core never
//!   depends on a concrete metrics backend
//! - Exposition is pull-based: the recorder handle renders the Prometheus
//!   text format on GET /metrics

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Counter-like sink request handlers record observations into.
pub trait ObservationSink: Send + Sync {
    /// Record one handled request.
    fn observe(&self, route: &'static str, elapsed: Duration);
}

/// Sink backed by the `metrics` facade, exported in Prometheus format.
pub struct PrometheusSink;

impl ObservationSink for PrometheusSink {
    fn observe(&self, route: &'static str, elapsed: Duration) {
        counter!("requests_total", "route" => route).increment(1);
        histogram!("request_duration_seconds", "route" => route).record(elapsed.as_secs_f64());
    }
}

/// Sink that discards observations.
pub struct NullSink;

impl ObservationSink for NullSink {
    fn observe(&self, _route: &'static str, _elapsed: Duration) {}
}

/// Install the process-global Prometheus recorder.
///
/// Returns the handle the metrics endpoint renders from. Must be called at
/// most once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

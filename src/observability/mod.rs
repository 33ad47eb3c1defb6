//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and lifecycle transitions produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (observation sink → metrics facade)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → GET /metrics (Prometheus scrape, same port as traffic)
//! ```
//!
//! # Design Decisions
//! - The core only sees the `ObservationSink` trait; Prometheus is one
//!   implementation behind it
//! - Metric updates are cheap (atomic operations in the recorder)
//! - RUST_LOG overrides the configured log level

pub mod logging;
pub mod metrics;

pub use metrics::{install_recorder, NullSink, ObservationSink, PrometheusSink};

//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, trace + timeout middleware)
//!     → GET /health   (registry probe, liveness only)
//!     → GET /metrics  (Prometheus text exposition)
//!     → GET /         (application handler, records into the sink)
//! ```
//!
//! # Design Decisions
//! - One fixed port serves traffic, probe, and metrics
//! - Bind and serve are split so bind failures surface as distinct fatal
//!   startup errors
//! - The drain is bounded: in-flight requests past the grace period are
//!   abandoned

pub mod server;

pub use server::{AppServer, AppState, DrainOutcome};

//! Herald — a self-registering HTTP service.
//!
//! On startup the service resolves its own reachable address, registers
//! itself with a Consul-compatible discovery agent, and serves application
//! traffic plus the agent's health probe on one port. On SIGINT/SIGTERM it
//! deregisters first, then drains the listener under a bounded grace period.
//!
//! # Architecture Overview
//!
//! ```text
//!               ┌───────────────────────────────────────────────────┐
//!               │                     HERALD                        │
//!               │                                                   │
//!   startup ────┼─▶ net::resolver ───▶ registry::consul ──┐         │
//!               │   (pick address)     (register instance)│         │
//!               │                                         ▼         │
//!               │                               lifecycle::         │
//!               │                               coordinator         │
//!               │                                    │              │
//!               │                                    ▼              │
//!   traffic ────┼─▶ http::server ◀─── /health probe from agent      │
//!               │   (/, /health, /metrics)                          │
//!               │                                    │              │
//!   SIGTERM ────┼─▶ lifecycle::signals ─▶ deregister ─▶ drain       │
//!               │                                                   │
//!               │  ┌─────────────────────────────────────────────┐  │
//!               │  │           Cross-Cutting Concerns            │  │
//!               │  │   ┌────────┐   ┌───────────────────────┐    │  │
//!               │  │   │ config │   │ observability         │    │  │
//!               │  │   │        │   │ (tracing + metrics)   │    │  │
//!               │  │   └────────┘   └───────────────────────┘    │  │
//!               │  └─────────────────────────────────────────────┘  │
//!               └───────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod registry;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use lifecycle::{Coordinator, Shutdown};
pub use registry::ServiceRegistry;

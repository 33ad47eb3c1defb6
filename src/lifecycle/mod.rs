//! Lifecycle management subsystem — the core of the service.
//!
//! # Data Flow
//! ```text
//! Startup (coordinator.rs):
//!     Resolve address → Register with discovery → Bind listener → Serve
//!
//! Shutdown (coordinator.rs):
//!     Signal received → Deregister → Stop accepting → Drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger the shutdown notification exactly once
//! ```
//!
//! # Design Decisions
//! - Strictly ordered startup: each step's success gates the next
//! - Deregister before drain: discovery stops routing new traffic as early
//!   as possible, at the cost of in-flight requests racing the drain
//! - Drain has a grace period: requests running past it are abandoned
//! - Any startup failure is fatal and leaves nothing registered

pub mod coordinator;
pub mod shutdown;
pub mod signals;

pub use coordinator::{Coordinator, LifecycleError, LifecycleState};
pub use shutdown::Shutdown;

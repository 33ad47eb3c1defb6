//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     resolver.rs enumerates local interfaces
//!     → filters loopback
//!     → applies selection policy (advertise / interface / default)
//!     → IpAddr advertised in the registration record
//! ```
//!
//! # Design Decisions
//! - Resolution happens exactly once, before registration
//! - No usable address is a fatal startup condition
//! - Selection policy is configuration, not platform enumeration order

pub mod resolver;

pub use resolver::{resolve, ResolveError};

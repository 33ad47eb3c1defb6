//! Discovery registry subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     instance.rs builds the registration record (id, address, probe spec)
//!     → ServiceRegistry::register submits it to the discovery backend
//!     → backend probes /health at the configured cadence
//!
//! Shutdown:
//!     ServiceRegistry::deregister removes the record (best effort);
//!     the backend's deregister-critical-after purge is the backstop
//! ```
//!
//! # Design Decisions
//! - The registry is a consumed capability behind a trait; tests inject
//!   doubles, production uses the Consul agent implementation
//! - Registration failure is fatal: running undiscoverable is worse than
//!   not running
//! - Deregistration failure is logged, never fatal

use async_trait::async_trait;

pub mod consul;
pub mod instance;

pub use consul::ConsulRegistry;
pub use instance::{HealthCheckSpec, ServiceInstance};

/// Error type for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The configured registry address is not a usable URL.
    #[error("invalid registry address: {0}")]
    Address(#[from] url::ParseError),

    /// The backend could not be reached.
    #[error("registry transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered but refused the request.
    #[error("registry rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Capability consumed by the lifecycle coordinator to make this instance
/// discoverable.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Submit the registration record. The backend starts probing the
    /// instance's health endpoint as a side effect.
    async fn register(&self, instance: &ServiceInstance) -> Result<(), RegistryError>;

    /// Remove the record for `id`. Best effort at shutdown.
    async fn deregister(&self, id: &str) -> Result<(), RegistryError>;
}

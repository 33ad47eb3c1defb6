//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Identity and listener settings.
    pub service: ServiceSection,

    /// Discovery registry settings.
    pub registry: RegistryConfig,

    /// Health probe descriptor submitted at registration.
    pub health_check: HealthCheckConfig,

    /// Address resolution policy.
    pub resolver: ResolverConfig,

    /// Shutdown behavior.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Service identity and listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSection {
    /// Logical service name shared by all instances of this kind.
    pub name: String,

    /// Port serving application traffic and the health probe.
    pub port: u16,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: "herald".to_string(),
            port: 9001,
            request_timeout_secs: 30,
        }
    }
}

impl ServiceSection {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Discovery registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the registry agent (e.g., "http://consul:8500").
    pub address: String,

    /// Timeout for register/deregister calls in seconds.
    pub request_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            address: "http://consul:8500".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Health check descriptor configuration.
///
/// These values are submitted to the registry at registration time; the
/// registry performs the probing, not this process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Probe cadence in seconds.
    pub interval_secs: u64,

    /// Max wait per probe in seconds.
    pub timeout_secs: u64,

    /// Continuous-failure duration after which the registry purges the
    /// instance, in seconds.
    pub deregister_after_secs: u64,

    /// Path the registry probes.
    pub path: String,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            timeout_secs: 10,
            deregister_after_secs: 60,
            path: "/health".to_string(),
        }
    }
}

impl HealthCheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn deregister_after(&self) -> Duration {
        Duration::from_secs(self.deregister_after_secs)
    }
}

/// Address resolution policy.
///
/// With neither field set, the resolver keeps the last non-loopback address
/// found while enumerating interfaces. That tie-break is arbitrary
/// (enumeration order varies by platform), so deployments with more than one
/// routable interface should pin one of these.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Advertise this address verbatim, skipping interface enumeration.
    pub advertise: Option<IpAddr>,

    /// Only consider addresses bound to this interface (e.g., "eth0").
    pub interface: Option<String>,
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Grace period for in-flight requests in seconds. Requests still
    /// running past this are abandoned.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_period_secs: 30 }
    }
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

//! The registration record for this process.

use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::HealthCheckConfig;

/// Health probe descriptor submitted alongside the registration record.
///
/// The registry performs the probing; these fields only tell it where and
/// how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckSpec {
    /// Absolute URL the registry probes.
    pub endpoint_url: String,

    /// Probe cadence.
    pub interval: Duration,

    /// Max wait per probe.
    pub timeout: Duration,

    /// Continuous-failure duration after which the registry purges the
    /// instance on its own.
    pub deregister_critical_after: Duration,
}

/// The record representing this process in the discovery registry.
///
/// Exactly one exists per process run, owned by the lifecycle coordinator.
/// All fields are written once at construction and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Unique per process run: `{name}-{unix seconds}-{random suffix}`.
    pub id: String,

    /// Logical service name shared by all instances of this kind.
    pub name: String,

    /// Reachable non-loopback address resolved at startup.
    pub address: IpAddr,

    /// Port advertised for both traffic and the health probe.
    pub port: u16,

    /// Probe descriptor.
    pub health_check: HealthCheckSpec,
}

impl ServiceInstance {
    /// Build the registration record for this process run.
    ///
    /// The id combines the start timestamp with a random suffix so that two
    /// instances started within the same second on the same host cannot
    /// collide in the registry.
    pub fn new(name: &str, address: IpAddr, port: u16, health: &HealthCheckConfig) -> Self {
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let suffix: u16 = rand::random();

        Self {
            id: format!("{name}-{started}-{suffix:04x}"),
            name: name.to_string(),
            address,
            port,
            health_check: HealthCheckSpec {
                endpoint_url: probe_url(address, port, &health.path),
                interval: health.interval(),
                timeout: health.timeout(),
                deregister_critical_after: health.deregister_after(),
            },
        }
    }
}

fn probe_url(address: IpAddr, port: u16, path: &str) -> String {
    match address {
        IpAddr::V4(v4) => format!("http://{v4}:{port}{path}"),
        IpAddr::V6(v6) => format!("http://[{v6}]:{port}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ServiceInstance {
        ServiceInstance::new(
            "orders",
            "10.0.0.5".parse().unwrap(),
            9001,
            &HealthCheckConfig::default(),
        )
    }

    #[test]
    fn id_carries_name_prefix() {
        assert!(instance().id.starts_with("orders-"));
    }

    #[test]
    fn ids_differ_within_the_same_second() {
        // Timestamp alone would collide here; the random suffix must not.
        let a = instance();
        let b = instance();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn probe_url_targets_the_advertised_address() {
        let inst = instance();
        assert_eq!(inst.health_check.endpoint_url, "http://10.0.0.5:9001/health");
    }

    #[test]
    fn probe_url_brackets_ipv6() {
        let url = probe_url("fd00::5".parse().unwrap(), 9001, "/health");
        assert_eq!(url, "http://[fd00::5]:9001/health");
    }
}

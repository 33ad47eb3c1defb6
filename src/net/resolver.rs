//! Reachable-address resolution.
//!
//! # Responsibilities
//! - Enumerate local network interfaces
//! - Skip loopback addresses
//! - Apply the configured selection policy
//!
//! # Design Decisions
//! - `advertise` bypasses enumeration entirely (containers, NAT)
//! - `interface` pins a NIC when the host has several routable ones
//! - The default tie-break keeps the last non-loopback address found;
//!   enumeration order varies by platform, so multi-homed hosts should
//!   configure one of the overrides instead

use std::net::IpAddr;

use crate::config::ResolverConfig;

/// Error type for address resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No interface yielded a usable non-loopback address.
    #[error("no routable non-loopback address found")]
    NoRoutableAddress,

    /// Platform-level interface enumeration failed.
    #[error("interface enumeration failed: {0}")]
    Enumeration(#[from] local_ip_address::Error),
}

/// Resolve the address this instance advertises in its registration record.
pub fn resolve(config: &ResolverConfig) -> Result<IpAddr, ResolveError> {
    if let Some(address) = config.advertise {
        tracing::debug!(address = %address, "Using configured advertise address");
        return Ok(address);
    }

    let candidates = local_ip_address::list_afinet_netifas()?;
    let address = select_address(&candidates, config.interface.as_deref())?;

    tracing::debug!(address = %address, "Resolved advertise address");
    Ok(address)
}

/// Pick an address from enumerated `(interface name, address)` candidates.
///
/// With a preferred interface, the first non-loopback address bound to it
/// wins. Otherwise the last non-loopback candidate wins.
fn select_address(
    candidates: &[(String, IpAddr)],
    preferred_interface: Option<&str>,
) -> Result<IpAddr, ResolveError> {
    if let Some(name) = preferred_interface {
        return candidates
            .iter()
            .find(|(iface, ip)| iface == name && !ip.is_loopback())
            .map(|(_, ip)| *ip)
            .ok_or(ResolveError::NoRoutableAddress);
    }

    candidates
        .iter()
        .filter(|(_, ip)| !ip.is_loopback())
        .next_back()
        .map(|(_, ip)| *ip)
        .ok_or(ResolveError::NoRoutableAddress)
}

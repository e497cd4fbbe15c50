//! Outbound interface discovery.
//!
//! "Connecting" a UDP socket performs a route lookup and fixes the local
//! address without sending anything. The address the OS picks for a public
//! destination is the one other devices on the LAN are most likely to reach.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use thiserror::Error;

/// Well-known public address used as the routing probe target.
pub const PROBE_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Failure to determine the outbound address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The probe socket could not be created or inspected.
    #[error("failed to open probe socket: {0}")]
    Socket(#[source] io::Error),

    /// No route to the probe target.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(#[source] io::Error),
}

/// Local IP address used for outbound traffic to the public internet.
pub fn outbound_ip() -> Result<IpAddr, AddressError> {
    outbound_ip_via(PROBE_TARGET)
}

/// Local IP address the OS would use to reach `target`.
pub fn outbound_ip_via(target: SocketAddr) -> Result<IpAddr, AddressError> {
    let unspecified: SocketAddr = match target {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (std::net::Ipv6Addr::UNSPECIFIED, 0).into(),
    };

    let socket = UdpSocket::bind(unspecified).map_err(AddressError::Socket)?;
    socket
        .connect(target)
        .map_err(AddressError::NetworkUnavailable)?;

    let local = socket.local_addr().map_err(AddressError::Socket)?;

    tracing::debug!(
        probe = %target,
        address = %local.ip(),
        "Resolved outbound address"
    );

    Ok(local.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_probe_resolves_to_loopback() {
        let target: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let ip = outbound_ip_via(target).unwrap();
        assert!(ip.is_loopback(), "got {ip}");
    }

    #[test]
    fn resolved_address_is_never_unspecified() {
        // The sandbox may have no route at all; only check the success case.
        if let Ok(ip) = outbound_ip() {
            assert!(!ip.is_unspecified());
        }
    }
}

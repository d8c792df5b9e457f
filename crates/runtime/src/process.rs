//! Port availability helpers used before binding or launching.

use std::net::TcpListener;

/// Returns `true` when `port` can be bound on localhost.
pub fn port_available(port: u16) -> bool {
	TcpListener::bind(("127.0.0.1", port)).is_ok()
}

/// Returns the first port in `ports` that is already taken, if any.
pub fn first_unavailable(ports: &[u16]) -> Option<u16> {
	ports.iter().copied().find(|port| !port_available(*port))
}

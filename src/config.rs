//! The argument & port validator (C1): turns CLI args into an immutable
//! config record, then binds the listening socket.

use std::net::{TcpListener, TcpStream};

use crate::cli::ServerArgs;
use crate::consts::{PORT_MAX, PORT_MIN};

/// Immutable server configuration. `clap` enforces `port`'s upper bound
/// and `max`'s range on parse; `Server::new` calls `is_valid_port` for the
/// lower bound (0 or [1024, 65535]) before building one of these.
#[derive(Clone, Copy, Debug)]
pub struct ServerConfig {
    /// Requested port; 0 means "let the OS choose an ephemeral one".
    pub port: u16,
    /// Connection admission cap; `None` means unbounded.
    pub max_connections: Option<u32>,
}

impl From<&ServerArgs> for ServerConfig {
    fn from(args: &ServerArgs) -> Self {
        Self { port: args.port, max_connections: args.max }
    }
}

impl ServerConfig {
    /// Binds an IPv4 TCP socket and returns the listener together with the
    /// effective port number actually bound.
    ///
    /// `std::net::TcpListener` already sets `SO_REUSEADDR` on Unix and
    /// picks its own backlog; admission beyond that point is governed
    /// entirely by the dispatcher's semaphore, not by the kernel backlog,
    /// so no lower-level socket crate is needed here.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error on bind failure.
    pub fn bind_listener(&self) -> std::io::Result<(TcpListener, u16)> {
        let listener = TcpListener::bind(("0.0.0.0", self.port))?;
        let effective_port = listener.local_addr()?.port();
        Ok((listener, effective_port))
    }
}

/// Immutable client configuration, already range-checked by `clap`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub port: u16,
    pub input: Option<String>,
    pub output: Option<String>,
    pub operation: Option<crate::operation::Operation>,
}

impl ClientConfig {
    /// Connects to the server this config names, dialing `localhost` on
    /// the configured port (matching the original CLI's convention of a
    /// local-only client, not a general-purpose network address).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the connection attempt fails.
    pub fn connect(&self) -> std::io::Result<TcpStream> {
        TcpStream::connect(("localhost", self.port))
    }
}

/// True if `port` is either the ephemeral sentinel `0` or within the
/// standard non-privileged range.
#[must_use]
pub fn is_valid_port(port: u16) -> bool {
    port == 0 || (PORT_MIN..=PORT_MAX).contains(&port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_zero_and_the_registered_range_are_valid() {
        assert!(is_valid_port(0));
        assert!(is_valid_port(1024));
        assert!(is_valid_port(65535));
    }

    #[test]
    fn ports_below_the_registered_range_are_invalid() {
        assert!(!is_valid_port(1023));
    }

    #[test]
    fn bind_listener_reports_the_effective_port() {
        let config = ServerConfig { port: 0, max_connections: None };
        let (_listener, port) = config.bind_listener().unwrap();
        assert_ne!(port, 0);
    }
}

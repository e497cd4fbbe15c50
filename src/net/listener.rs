//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind to the requested address and port
//! - Report the concrete bound address (resolves port 0)
//! - Hand the socket over to the HTTP accept loop

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// A bound TCP listener that knows its own address.
#[derive(Debug)]
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Address the OS actually bound.
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind to `addr`. A port of 0 picks an ephemeral port.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ListenerError> {
        let inner = TcpListener::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind { addr, source })?;

        let local_addr = inner
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        tracing::info!(
            requested = %addr,
            address = %local_addr,
            "Listener bound"
        );

        Ok(Self { inner, local_addr })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Give up the listener to the accept loop.
    pub fn into_inner(self) -> TcpListener {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn port_zero_reports_assigned_port() {
        let listener = Listener::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = listener.local_addr();
        assert_ne!(addr.port(), 0);
        assert!(addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn taken_port_is_a_bind_error() {
        let first = Listener::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let taken = first.local_addr();

        match Listener::bind(taken).await {
            Err(ListenerError::Bind { addr, .. }) => assert_eq!(addr, taken),
            Ok(_) => panic!("second bind on {taken} succeeded"),
        }
    }
}

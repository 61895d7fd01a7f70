//! UDP transport to the upstream resolver (RFC 1035 §4.2.1)
//!
//! Every exchange binds its own ephemeral socket, connects it to the
//! resolver, sends one query and waits for one reply. The socket is closed
//! when the exchange returns, whatever the outcome. Connecting the socket
//! makes the kernel discard datagrams from any other source.

use super::resolver::resolve_upstream;
use super::MAX_UDP_RESPONSE_SIZE;
use async_trait::async_trait;
use relay53_application::ports::UpstreamExchange;
use relay53_domain::{DomainError, UpstreamAddr};
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Upper bound on the wait for one upstream reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves `upstream` (a literal address or a hostname) and builds a
    /// transport for it.
    pub async fn for_upstream(
        upstream: &UpstreamAddr,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let server_addr = resolve_upstream(upstream, timeout).await?;
        Ok(Self::new(server_addr).with_timeout(timeout))
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, action: &str, e: impl Display) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }
}

#[async_trait]
impl UpstreamExchange for UdpTransport {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error("failed to bind UDP socket", e))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.transport_error("failed to connect UDP socket", e))?;

        let bytes_sent = socket
            .send(query)
            .await
            .map_err(|e| self.transport_error("failed to send query", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::ForwardTimeout {
                server: self.server_addr.to_string(),
            })?
            .map_err(|e| self.transport_error("failed to receive reply", e))?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        validate_response_id(query, &recv_buf, self.server_addr)?;

        Ok(recv_buf)
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

/// Rejects a reply whose ID differs from the query it should answer.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    let (Some(sent), Some(got)) = (query.get(0..2), response.get(0..2)) else {
        return Err(DomainError::Transport {
            server: server.to_string(),
            reason: "message too short to carry an ID".to_string(),
        });
    };

    if sent != got {
        return Err(DomainError::Transport {
            server: server.to_string(),
            reason: format!(
                "reply ID mismatch: sent 0x{:02X}{:02X}, got 0x{:02X}{:02X}",
                sent[0], sent[1], got[0], got[1]
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;

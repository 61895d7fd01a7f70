use relay53_application::use_cases::HandleDatagramUseCase;
use relay53_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Adapts raw client datagrams to the datagram use case.
///
/// Failures never propagate: a datagram that cannot be answered is logged
/// and dropped, so the listener keeps serving.
pub struct DnsServerHandler {
    use_case: Arc<HandleDatagramUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDatagramUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the reply to send back to `client`, or `None` when the
    /// datagram is dropped.
    pub async fn handle_raw_udp(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let start = Instant::now();

        match self.use_case.execute(datagram).await {
            Ok(reply) => {
                debug!(
                    client = %client,
                    bytes_in = datagram.len(),
                    bytes_out = reply.len(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Query answered"
                );
                Some(reply)
            }
            Err(e) => {
                log_drop(&e, client, datagram.len());
                None
            }
        }
    }
}

fn log_drop(error: &DomainError, client: SocketAddr, len: usize) {
    match error {
        DomainError::MalformedMessage(_) => {
            warn!(client = %client, bytes = len, error = %error, "Dropping malformed datagram");
        }
        _ if error.is_timeout() => {
            warn!(client = %client, error = %error, "Upstream timed out, dropping query");
        }
        _ => {
            warn!(client = %client, error = %error, "Forwarding failed, dropping query");
        }
    }
}

use relay53_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Turns the configured resolver address into one socket address.
///
/// Literal addresses are returned as is. Hostnames are looked up through
/// the system resolver and the first address returned wins.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match upstream.unresolved_parts() {
        Some(parts) => parts,
        None => {
            return upstream
                .socket_addr()
                .ok_or_else(|| resolution_error(upstream, "no socket address"))
        }
    };

    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| resolution_error(upstream, "lookup timed out"))?
        .map_err(|e| resolution_error(upstream, e))?;

    addrs
        .next()
        .ok_or_else(|| resolution_error(upstream, "no addresses found"))
}

fn resolution_error(upstream: &UpstreamAddr, reason: impl ToString) -> DomainError {
    DomainError::AddressResolution {
        address: upstream.to_string(),
        reason: reason.to_string(),
    }
}

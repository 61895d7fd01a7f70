use async_trait::async_trait;
use relay53_domain::DomainError;

/// A single request/reply round trip with the upstream resolver.
///
/// Each call owns its own connection for the duration of the exchange and
/// releases it on every path, success or failure.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    /// Sends `query` and returns the raw reply datagram.
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError>;

    /// Printable address of the resolver, for logs.
    fn server(&self) -> String;
}

use async_trait::async_trait;
use relay53_domain::{DomainError, Message};

/// Turns a decoded query into the response to send back to the client.
#[async_trait]
pub trait QueryResolver: Send + Sync {
    async fn resolve(&self, query: &Message) -> Result<Message, DomainError>;
}

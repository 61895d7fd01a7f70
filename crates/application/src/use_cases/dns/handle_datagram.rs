use crate::ports::QueryResolver;
use relay53_domain::{DomainError, Message};
use std::sync::Arc;

/// Decodes one client datagram, resolves it and encodes the reply.
pub struct HandleDatagramUseCase {
    resolver: Arc<dyn QueryResolver>,
}

impl HandleDatagramUseCase {
    pub fn new(resolver: Arc<dyn QueryResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, datagram: &[u8]) -> Result<Vec<u8>, DomainError> {
        let query = Message::parse(datagram)?;
        let response = self.resolver.resolve(&query).await?;
        Ok(response.serialize())
    }
}

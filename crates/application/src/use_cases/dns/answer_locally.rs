use crate::ports::QueryResolver;
use async_trait::async_trait;
use relay53_domain::{DomainError, LocalAnswerConfig, Message};

/// Answers every question with the same fixed record, without contacting
/// any upstream.
pub struct AnswerLocallyUseCase {
    ttl: u32,
    rdata: Vec<u8>,
}

impl AnswerLocallyUseCase {
    pub fn new(ttl: u32, rdata: Vec<u8>) -> Self {
        Self { ttl, rdata }
    }

    pub fn from_config(config: &LocalAnswerConfig) -> Self {
        Self::new(config.ttl, config.rdata())
    }

    pub fn execute(&self, query: &Message) -> Message {
        query.respond(self.ttl, &self.rdata)
    }
}

#[async_trait]
impl QueryResolver for AnswerLocallyUseCase {
    async fn resolve(&self, query: &Message) -> Result<Message, DomainError> {
        Ok(self.execute(query))
    }
}

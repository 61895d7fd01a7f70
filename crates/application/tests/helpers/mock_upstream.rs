#![allow(dead_code)]

use async_trait::async_trait;
use relay53_application::ports::UpstreamExchange;
use relay53_domain::{DomainError, HeaderFlags, Message, Question};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;
pub const DEFAULT_RDATA: [u8; 4] = [127, 0, 0, 1];

/// Upstream that answers each sub-query by name, with scripted failures,
/// garbage replies and delays.
#[derive(Clone, Default)]
pub struct MockUpstream {
    answers: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    errors: Arc<RwLock<HashMap<String, DomainError>>>,
    garbage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    received: Arc<RwLock<Vec<Message>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_answer(&self, domain: &str, rdata: &[u8]) {
        self.answers
            .write()
            .unwrap()
            .insert(domain.to_string(), rdata.to_vec());
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.errors
            .write()
            .unwrap()
            .insert(domain.to_string(), error);
    }

    pub fn set_garbage_reply(&self, domain: &str, bytes: &[u8]) {
        self.garbage
            .write()
            .unwrap()
            .insert(domain.to_string(), bytes.to_vec());
    }

    pub fn set_delay(&self, domain: &str, delay: Duration) {
        self.delays
            .write()
            .unwrap()
            .insert(domain.to_string(), delay);
    }

    pub fn received(&self) -> Vec<Message> {
        self.received.read().unwrap().clone()
    }

    pub fn received_names(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|m| m.questions[0].name.to_string())
            .collect()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let message = Message::parse(query).expect("forwarder sent an undecodable query");
        self.received.write().unwrap().push(message.clone());

        let domain = message.questions[0].name.to_string();

        let delay = self.delays.read().unwrap().get(&domain).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.errors.read().unwrap().get(&domain) {
            return Err(error.clone());
        }
        if let Some(bytes) = self.garbage.read().unwrap().get(&domain) {
            return Ok(bytes.clone());
        }

        let rdata = self
            .answers
            .read()
            .unwrap()
            .get(&domain)
            .cloned()
            .unwrap_or_else(|| DEFAULT_RDATA.to_vec());

        let mut reply = message.respond(300, &rdata);
        reply.header.flags.ra = true;
        Ok(reply.serialize())
    }

    fn server(&self) -> String {
        "mock-upstream:53".to_string()
    }
}

pub fn query(id: u16, domains: &[&str]) -> Message {
    let mut message = Message::default();
    message.header.id = id;
    message.header.flags = HeaderFlags {
        rd: true,
        ..Default::default()
    };
    message.questions = domains
        .iter()
        .map(|d| Question::new(d.parse().unwrap(), TYPE_A, CLASS_IN))
        .collect();
    message.header.qdcount = message.questions.len() as u16;
    message
}

pub fn timeout_error() -> DomainError {
    DomainError::ForwardTimeout {
        server: "mock-upstream:53".to_string(),
    }
}

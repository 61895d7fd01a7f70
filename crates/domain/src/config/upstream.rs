use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// `host:port` of the resolver queries are forwarded to. Without one
    /// the server answers locally.
    pub resolver: Option<String>,

    /// Per sub-query bound on waiting for a reply.
    pub timeout_ms: u64,

    /// Send all sub-queries of a datagram at once instead of one by one.
    pub parallel_subqueries: bool,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            timeout_ms: 5_000,
            parallel_subqueries: false,
        }
    }
}

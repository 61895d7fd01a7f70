use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Fixed answer served to every question when no resolver is configured.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalAnswerConfig {
    pub ttl: u32,

    pub address: IpAddr,
}

impl LocalAnswerConfig {
    /// The address as RDATA: 4 bytes for IPv4, 16 for IPv6.
    pub fn rdata(&self) -> Vec<u8> {
        match self.address {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }
}

impl Default for LocalAnswerConfig {
    fn default() -> Self {
        Self {
            ttl: 60,
            address: IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
        }
    }
}

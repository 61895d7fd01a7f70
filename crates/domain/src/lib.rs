//! relay53 Domain Layer
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod upstream_addr;

pub use config::{CliOverrides, Config, ConfigError, LocalAnswerConfig};
pub use dns_message::{Answer, Header, HeaderFlags, Label, Message, Name, Question};
pub use errors::DomainError;
pub use upstream_addr::UpstreamAddr;

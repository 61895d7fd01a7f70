use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Failed to resolve upstream address {address}: {reason}")]
    AddressResolution { address: String, reason: String },

    #[error("Timeout waiting for reply from {server}")]
    ForwardTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Sub-query {index} failed: {source}")]
    Forward {
        index: usize,
        #[source]
        source: Box<DomainError>,
    },

    #[error("Query carries no questions")]
    NoQuestions,
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage(reason.into())
    }

    /// Wraps a failure of the sub-query at `index` into a forwarding error.
    pub fn forward(index: usize, source: DomainError) -> Self {
        Self::Forward {
            index,
            source: Box::new(source),
        }
    }

    /// True when this error, or the error it wraps, is an upstream timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::ForwardTimeout { .. } => true,
            Self::Forward { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

mod query_resolver;
mod upstream_exchange;

pub use query_resolver::QueryResolver;
pub use upstream_exchange::UpstreamExchange;

// Re-export for convenience
pub use relay53_domain::Message;

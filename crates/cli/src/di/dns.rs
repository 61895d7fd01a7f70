use relay53_application::ports::QueryResolver;
use relay53_application::use_cases::{
    AnswerLocallyUseCase, ForwardQueryUseCase, HandleDatagramUseCase,
};
use relay53_domain::{Config, DomainError, UpstreamAddr};
use relay53_infrastructure::dns::{DnsServerHandler, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Wires the datagram handler: forwarding when a resolver is
    /// configured, local answers otherwise. Resolver address resolution
    /// happens here, so a bad address stops startup before any socket is
    /// opened.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = Self::build_resolver(config).await?;
        let use_case = Arc::new(HandleDatagramUseCase::new(resolver));

        Ok(Self {
            handler: DnsServerHandler::new(use_case),
        })
    }

    async fn build_resolver(config: &Config) -> anyhow::Result<Arc<dyn QueryResolver>> {
        let Some(resolver) = config.upstream.resolver.as_deref() else {
            info!(
                address = %config.local_answer.address,
                ttl = config.local_answer.ttl,
                "No resolver configured, answering locally"
            );
            return Ok(Arc::new(AnswerLocallyUseCase::from_config(
                &config.local_answer,
            )));
        };

        let upstream: UpstreamAddr =
            resolver
                .parse()
                .map_err(|reason| DomainError::AddressResolution {
                    address: resolver.to_string(),
                    reason,
                })?;
        let transport =
            UdpTransport::for_upstream(&upstream, config.upstream.timeout()).await?;

        info!(
            resolver = %upstream,
            server = %transport.server_addr(),
            timeout_ms = config.upstream.timeout_ms,
            parallel_subqueries = config.upstream.parallel_subqueries,
            "Forwarding to upstream resolver"
        );

        Ok(Arc::new(
            ForwardQueryUseCase::new(Arc::new(transport))
                .with_parallel_subqueries(config.upstream.parallel_subqueries),
        ))
    }
}

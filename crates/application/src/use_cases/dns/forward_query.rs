use crate::ports::{QueryResolver, UpstreamExchange};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use relay53_domain::{DomainError, Message};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Forwards a query to the upstream resolver one question at a time and
/// merges the replies back into a single response.
///
/// Sub-queries run sequentially by default. With parallel sub-queries
/// enabled they are all in flight at once; each reply is tagged with the
/// index of the question it answers and replies are put back in question
/// order before merging. Either way the first failure aborts the whole
/// forward and no partial response is produced.
pub struct ForwardQueryUseCase {
    upstream: Arc<dyn UpstreamExchange>,
    parallel_subqueries: bool,
}

impl ForwardQueryUseCase {
    pub fn new(upstream: Arc<dyn UpstreamExchange>) -> Self {
        Self {
            upstream,
            parallel_subqueries: false,
        }
    }

    pub fn with_parallel_subqueries(mut self, enabled: bool) -> Self {
        self.parallel_subqueries = enabled;
        self
    }

    pub async fn execute(&self, query: &Message) -> Result<Message, DomainError> {
        if query.questions.is_empty() {
            return Err(DomainError::NoQuestions);
        }

        let start = Instant::now();
        let parts = query.split();
        let count = parts.len();

        let replies = if self.parallel_subqueries {
            self.exchange_parallel(parts).await?
        } else {
            self.exchange_sequential(parts).await?
        };

        debug!(
            id = query.header.id,
            subqueries = count,
            upstream = %self.upstream.server(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Forwarded query"
        );

        Message::merge(replies).ok_or(DomainError::NoQuestions)
    }

    async fn exchange_sequential(&self, parts: Vec<Message>) -> Result<Vec<Message>, DomainError> {
        let mut replies = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            replies.push(self.exchange_one(index, part).await?);
        }
        Ok(replies)
    }

    async fn exchange_parallel(&self, parts: Vec<Message>) -> Result<Vec<Message>, DomainError> {
        let mut slots: Vec<Option<Message>> = vec![None; parts.len()];

        let mut in_flight: FuturesUnordered<_> = parts
            .iter()
            .enumerate()
            .map(|(index, part)| async move { (index, self.exchange_one(index, part).await) })
            .collect();

        while let Some((index, result)) = in_flight.next().await {
            slots[index] = Some(result?);
        }

        // Every slot is filled once the stream drains without an error.
        Ok(slots.into_iter().flatten().collect())
    }

    async fn exchange_one(&self, index: usize, part: &Message) -> Result<Message, DomainError> {
        let reply = self
            .upstream
            .exchange(&part.serialize())
            .await
            .map_err(|e| DomainError::forward(index, e))?;

        Message::parse(&reply).map_err(|e| DomainError::forward(index, e))
    }
}

#[async_trait]
impl QueryResolver for ForwardQueryUseCase {
    async fn resolve(&self, query: &Message) -> Result<Message, DomainError> {
        self.execute(query).await
    }
}

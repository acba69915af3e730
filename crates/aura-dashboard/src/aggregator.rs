// aggregator.rs — DataAggregator: run independent sources concurrently.
//
// Every source is issued at once and the aggregation waits for all of them
// to settle, so total latency is the slowest source. Each source gets its
// own timeout and bounded retry of transient failures. Runs share no state.

use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{AggregateError, FailureCause, SourceFailure};
use crate::source::Source;

/// Per-source timeout and retry settings (`[aggregator]` in `.aura/config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregatorPolicy {
    /// Upper bound on a single attempt.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total tries per source, including the first. Zero is treated as one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause before each retry.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    100
}

impl Default for AggregatorPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// How one source settled.
#[derive(Debug, Clone)]
pub enum SourceOutcome<T> {
    Ready(T),
    Failed(SourceFailure),
}

impl<T> SourceOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, SourceOutcome::Ready(_))
    }
}

/// Every source's outcome, in declaration order.
#[derive(Debug, Clone)]
pub struct Settled<T> {
    outcomes: Vec<(String, SourceOutcome<T>)>,
}

impl<T> Settled<T> {
    pub fn outcomes(&self) -> &[(String, SourceOutcome<T>)] {
        &self.outcomes
    }

    /// True when every source produced a value.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_ready())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceFailure> {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            SourceOutcome::Failed(failure) => Some(failure),
            SourceOutcome::Ready(_) => None,
        })
    }

    /// Split into the values that arrived and the failures, both in
    /// declaration order.
    pub fn partition(self) -> (Vec<(String, T)>, Vec<SourceFailure>) {
        let mut ready = Vec::new();
        let mut failed = Vec::new();
        for (key, outcome) in self.outcomes {
            match outcome {
                SourceOutcome::Ready(value) => ready.push((key, value)),
                SourceOutcome::Failed(failure) => failed.push(failure),
            }
        }
        (ready, failed)
    }

    /// All-or-nothing view: every value, or the first failure in declaration
    /// order.
    pub fn into_all(self) -> Result<Vec<(String, T)>, AggregateError> {
        let mut values = Vec::with_capacity(self.outcomes.len());
        for (key, outcome) in self.outcomes {
            match outcome {
                SourceOutcome::Ready(value) => values.push((key, value)),
                SourceOutcome::Failed(SourceFailure {
                    cause: FailureCause::Cancelled,
                    ..
                }) => return Err(AggregateError::Cancelled),
                SourceOutcome::Failed(failure) => return Err(AggregateError::SourceFailure(failure)),
            }
        }
        Ok(values)
    }
}

/// Runs sets of sources concurrently under one [`AggregatorPolicy`].
#[derive(Debug, Clone, Default)]
pub struct DataAggregator {
    policy: AggregatorPolicy,
}

impl DataAggregator {
    pub fn new(policy: AggregatorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AggregatorPolicy {
        &self.policy
    }

    /// Resolve to every source's value keyed by source, or reject if any
    /// source failed. Waits for all sources to settle either way.
    pub async fn aggregate_all<T>(
        &self,
        sources: Vec<Source<T>>,
        cancel: &CancellationToken,
    ) -> Result<Vec<(String, T)>, AggregateError> {
        self.aggregate_settled(sources, cancel)
            .await
            .into_all()
            .inspect_err(|e| tracing::warn!(error = %e, "aggregation rejected"))
    }

    /// Resolve to one outcome per source; never rejects.
    pub async fn aggregate_settled<T>(
        &self,
        sources: Vec<Source<T>>,
        cancel: &CancellationToken,
    ) -> Settled<T> {
        tracing::debug!(sources = sources.len(), "aggregating");
        let outcomes = join_all(sources.iter().map(|source| self.settle(source, cancel))).await;

        Settled {
            outcomes: sources
                .iter()
                .map(|source| source.key().to_string())
                .zip(outcomes)
                .collect(),
        }
    }

    async fn settle<T>(&self, source: &Source<T>, cancel: &CancellationToken) -> SourceOutcome<T> {
        let timeout = Duration::from_millis(self.policy.timeout_ms);
        let backoff = Duration::from_millis(self.policy.retry_backoff_ms);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = tokio::time::timeout(timeout, source.fetch()) => Some(result),
            };

            let cause = match result {
                None => FailureCause::Cancelled,
                Some(Ok(Ok(value))) => return SourceOutcome::Ready(value),
                Some(Ok(Err(e))) => FailureCause::Backend(e),
                Some(Err(_)) => FailureCause::TimedOut {
                    timeout_ms: self.policy.timeout_ms,
                },
            };

            if !cause.is_transient() || attempts >= max_attempts {
                tracing::warn!(source = source.key(), attempts, cause = %cause, "source failed");
                return SourceOutcome::Failed(SourceFailure {
                    key: source.key().to_string(),
                    cause,
                    attempts,
                });
            }

            tracing::debug!(source = source.key(), attempts, cause = %cause, "retrying source");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return SourceOutcome::Failed(SourceFailure {
                        key: source.key().to_string(),
                        cause: FailureCause::Cancelled,
                        attempts,
                    });
                }
                _ = tokio::time::sleep(backoff) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::{BackendError, Operation};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn after(key: &str, ms: u64, value: u32) -> Source<u32> {
        Source::new(key, move || async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(value)
        })
    }

    fn unavailable() -> BackendError {
        BackendError::Unavailable {
            operation: Operation::Goals,
            reason: "injected fault".into(),
        }
    }

    fn failing(key: &str, ms: u64) -> Source<u32> {
        Source::new(key, move || async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Err(unavailable())
        })
    }

    fn no_retry() -> DataAggregator {
        DataAggregator::new(AggregatorPolicy {
            max_attempts: 1,
            ..AggregatorPolicy::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn all_fulfilled_resolves_keyed_in_order() {
        let aggregator = DataAggregator::default();
        let start = Instant::now();

        let values = aggregator
            .aggregate_all(
                vec![after("a", 300, 1), after("b", 800, 2), after("c", 500, 3)],
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            values,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
        // Concurrent: total latency is the slowest source, not the sum.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800) && elapsed < Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn single_failure_rejects_whole_aggregation() {
        let result = no_retry()
            .aggregate_all(
                vec![after("a", 100, 1), failing("b", 100), after("c", 100, 3)],
                &CancellationToken::new(),
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.failed_key(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_in_declaration_order_is_reported() {
        // "c" fails first in time, but "b" is declared first.
        let err = no_retry()
            .aggregate_all(
                vec![after("a", 10, 1), failing("b", 500), failing("c", 10)],
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.failed_key(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn aggregation_waits_for_every_source_before_rejecting() {
        let start = Instant::now();
        let _ = no_retry()
            .aggregate_all(
                vec![failing("a", 10), after("b", 900, 2)],
                &CancellationToken::new(),
            )
            .await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(900) && elapsed < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn settled_reports_every_source() {
        let settled = no_retry()
            .aggregate_settled(
                vec![after("a", 100, 1), failing("b", 100), after("c", 100, 3)],
                &CancellationToken::new(),
            )
            .await;

        assert!(!settled.is_complete());
        let failed: Vec<&str> = settled.failures().map(|f| f.key.as_str()).collect();
        assert_eq!(failed, vec!["b"]);

        let (ready, failed) = settled.partition();
        assert_eq!(ready, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
        assert_eq!(failed.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_is_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let flaky = Source::new("flaky", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(unavailable())
                } else {
                    Ok(7)
                }
            }
        });

        let values = DataAggregator::default()
            .aggregate_all(vec![flaky], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(values, vec![("flaky".to_string(), 7)]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn validation_failure_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let invalid: Source<u32> = Source::new("invalid", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(BackendError::Validation("bad".into())) }
        });

        let settled = DataAggregator::default()
            .aggregate_settled(vec![invalid], &CancellationToken::new())
            .await;
        let failure = settled.failures().next().unwrap();
        assert_eq!(failure.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out_after_bounded_attempts() {
        let start = Instant::now();
        let settled = DataAggregator::default()
            .aggregate_settled(vec![after("slow", 10_000, 1)], &CancellationToken::new())
            .await;

        let failure = settled.failures().next().unwrap();
        assert!(matches!(
            failure.cause,
            FailureCause::TimedOut { timeout_ms: 3000 }
        ));
        assert_eq!(failure.attempts, 2);
        assert!(start.elapsed() >= Duration::from_millis(3000 + 100 + 3000));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_settles_pending_sources() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let aggregator = DataAggregator::default();
        let result = aggregator
            .aggregate_all(vec![after("fast", 100, 1), after("slow", 1000, 2)], &cancel)
            .await;
        assert!(matches!(result, Err(AggregateError::Cancelled)));
    }

    #[tokio::test]
    async fn empty_source_list_resolves_empty() {
        let values = DataAggregator::default()
            .aggregate_all(Vec::<Source<u32>>::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn policy_defaults_fill_missing_fields() {
        let policy: AggregatorPolicy = serde_json::from_str(r#"{"timeout_ms": 500}"#).unwrap();
        assert_eq!(policy.timeout_ms, 500);
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.retry_backoff_ms, 100);
    }
}

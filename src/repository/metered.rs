//! Repository decorator that records storage metrics

use crate::error::Result;
use crate::metrics::{MetricsCollector, MetricsTimer};
use crate::repository::WordRepository;
use crate::types::WordRecord;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

/// Wraps another repository and times every call
pub struct MeteredWordRepository {
    inner: Arc<dyn WordRepository>,
    metrics: Arc<MetricsCollector>,
}

impl MeteredWordRepository {
    pub fn new(inner: Arc<dyn WordRepository>, metrics: Arc<MetricsCollector>) -> Self {
        Self { inner, metrics }
    }

    fn observe<T>(&self, operation: &str, result: &Result<T>, timer: MetricsTimer) {
        let duration = timer.stop();
        if let Err(e) = result {
            error!(
                "Word store operation '{}' failed after {:.2}ms: {}",
                operation,
                duration.as_secs_f64() * 1000.0,
                e
            );
        }
        self.metrics
            .record_storage_operation(operation, result.is_ok(), duration);
    }
}

#[async_trait]
impl WordRepository for MeteredWordRepository {
    async fn count_matching(&self, length_filter: Option<i64>) -> Result<i64> {
        let timer = self.metrics.start_timer();
        let result = self.inner.count_matching(length_filter).await;
        self.observe("count_matching", &result, timer);
        result
    }

    async fn fetch_at_offset(
        &self,
        offset: i64,
        length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>> {
        let timer = self.metrics.start_timer();
        let result = self.inner.fetch_at_offset(offset, length_filter).await;
        self.observe("fetch_at_offset", &result, timer);
        result
    }

    async fn fetch_exact(&self, word: &str) -> Result<Vec<WordRecord>> {
        let timer = self.metrics.start_timer();
        let result = self.inner.fetch_exact(word).await;
        self.observe("fetch_exact", &result, timer);
        result
    }

    async fn ping(&self) -> Result<()> {
        let timer = self.metrics.start_timer();
        let result = self.inner.ping().await;
        self.observe("ping", &result, timer);
        result
    }
}

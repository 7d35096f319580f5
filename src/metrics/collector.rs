//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the scrabble-words service
//! using Prometheus metrics.

use anyhow::Result;
use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the word service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// HTTP request metrics
    request_metrics: RequestMetrics,

    /// Word store metrics
    storage_metrics: StorageMetrics,

    /// Word lookup outcome metrics
    word_metrics: WordMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,
}

/// HTTP request metrics
#[derive(Clone)]
pub struct RequestMetrics {
    /// Total requests by endpoint and status code
    pub requests_total: IntCounterVec,

    /// Request handling duration by endpoint
    pub request_duration: HistogramVec,
}

/// Word store metrics
#[derive(Clone)]
pub struct StorageMetrics {
    /// Total repository operations by operation and status
    pub operations_total: IntCounterVec,

    /// Repository operation duration by operation
    pub operation_duration: HistogramVec,
}

/// Word lookup outcome metrics
#[derive(Clone)]
pub struct WordMetrics {
    /// Random words served, labelled by whether a length filter was given
    pub words_served_total: IntCounterVec,

    /// Random selections that matched no rows
    pub empty_selections_total: IntCounter,

    /// Validation outcomes (valid/invalid)
    pub validations_total: IntCounterVec,

    /// Requests rejected for bad query parameters
    pub invalid_requests_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let request_metrics = RequestMetrics::new(&registry)?;
        let storage_metrics = StorageMetrics::new(&registry)?;
        let word_metrics = WordMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            request_metrics,
            storage_metrics,
            word_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    pub fn request(&self) -> &RequestMetrics {
        &self.request_metrics
    }

    pub fn storage(&self) -> &StorageMetrics {
        &self.storage_metrics
    }

    pub fn word(&self) -> &WordMetrics {
        &self.word_metrics
    }

    /// Record a completed HTTP request
    pub fn record_request(&self, endpoint: &str, status: u16, duration: Duration) {
        let status = status.to_string();

        self.request_metrics
            .requests_total
            .with_label_values(&[endpoint, status.as_str()])
            .inc();

        self.request_metrics
            .request_duration
            .with_label_values(&[endpoint])
            .observe(duration.as_secs_f64());
    }

    /// Record a repository operation
    pub fn record_storage_operation(&self, operation: &str, success: bool, duration: Duration) {
        let status = if success { "success" } else { "error" };

        self.storage_metrics
            .operations_total
            .with_label_values(&[operation, status])
            .inc();

        self.storage_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Record the outcome of a random selection
    pub fn record_selection(&self, filtered: bool, found: bool) {
        if !found {
            self.word_metrics.empty_selections_total.inc();
            return;
        }

        let filtered = if filtered { "true" } else { "false" };
        self.word_metrics
            .words_served_total
            .with_label_values(&[filtered])
            .inc();
    }

    /// Record the outcome of a word validation
    pub fn record_validation(&self, valid: bool) {
        let result = if valid { "valid" } else { "invalid" };

        self.word_metrics
            .validations_total
            .with_label_values(&[result])
            .inc();
    }

    /// Record a request rejected for bad input
    pub fn record_invalid_request(&self, endpoint: &str) {
        self.word_metrics
            .invalid_requests_total
            .with_label_values(&[endpoint])
            .inc();
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Start a timer for measuring durations
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Helper for timing operations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("scrabble_words_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let health_status = IntGauge::new(
            "scrabble_words_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            uptime_seconds,
            health_status,
        })
    }
}

impl RequestMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new("scrabble_words_requests_total", "Total HTTP requests"),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "scrabble_words_request_duration_seconds",
                "HTTP request handling duration",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            requests_total,
            request_duration,
        })
    }
}

impl StorageMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let operations_total = IntCounterVec::new(
            Opts::new(
                "scrabble_words_storage_operations_total",
                "Total word store operations",
            ),
            &["operation", "status"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "scrabble_words_storage_operation_duration_seconds",
                "Word store operation duration",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            operations_total,
            operation_duration,
        })
    }
}

impl WordMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let words_served_total = IntCounterVec::new(
            Opts::new("scrabble_words_words_served_total", "Random words served"),
            &["filtered"],
        )?;
        registry.register(Box::new(words_served_total.clone()))?;

        let empty_selections_total = IntCounter::new(
            "scrabble_words_empty_selections_total",
            "Random selections that matched no words",
        )?;
        registry.register(Box::new(empty_selections_total.clone()))?;

        let validations_total = IntCounterVec::new(
            Opts::new("scrabble_words_validations_total", "Word validations"),
            &["result"],
        )?;
        registry.register(Box::new(validations_total.clone()))?;

        let invalid_requests_total = IntCounterVec::new(
            Opts::new(
                "scrabble_words_invalid_requests_total",
                "Requests rejected for bad query parameters",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(invalid_requests_total.clone()))?;

        Ok(Self {
            words_served_total,
            empty_selections_total,
            validations_total,
            invalid_requests_total,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}

//! Metrics and monitoring for the scrabble-words service
//!
//! This module provides Prometheus metrics collection for requests, word
//! store operations and lookup outcomes.

pub mod collector;

pub use collector::{
    MetricsCollector, MetricsTimer, RequestMetrics, ServiceMetrics, StorageMetrics, WordMetrics,
};

//! Main application state and service coordination
//!
//! This module contains the AppState shared by every request handler: the
//! configuration, the word repository, the word service and metrics.

use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::repository::{MeteredWordRepository, MySqlWordRepository, WordRepository};
use crate::words::WordService;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Word store, wrapped with metrics
    repository: Arc<dyn WordRepository>,

    /// Random word and validation lookups
    words: WordService,

    /// Metrics for monitoring and health checks
    metrics: Arc<MetricsCollector>,

    /// Service status
    is_running: Arc<RwLock<bool>>,

    started_at: Instant,
}

impl AppState {
    /// Initialize the application against the configured MySQL word store
    pub async fn new(config: AppConfig) -> Result<Self, ServiceError> {
        info!("Initializing scrabble-words service");
        info!(
            "Configuration: service={}, word_store={}",
            config.service.name,
            config.database.redacted_address()
        );

        let repository =
            MySqlWordRepository::new(&config.database).map_err(|e| ServiceError::Configuration {
                message: format!("Invalid word store settings: {}", e),
            })?;

        Self::with_repository(config, Arc::new(repository))
    }

    /// Initialize the application over any word repository
    pub fn with_repository(
        config: AppConfig,
        repository: Arc<dyn WordRepository>,
    ) -> Result<Self, ServiceError> {
        let metrics =
            Arc::new(
                MetricsCollector::new().map_err(|e| ServiceError::Initialization {
                    message: format!("Failed to create metrics collector: {}", e),
                })?,
            );

        let repository: Arc<dyn WordRepository> =
            Arc::new(MeteredWordRepository::new(repository, metrics.clone()));
        let words = WordService::new(repository.clone(), metrics.clone());

        Ok(Self {
            config,
            repository,
            words,
            metrics,
            is_running: Arc::new(RwLock::new(false)),
            started_at: Instant::now(),
        })
    }

    /// Replace the word service (e.g. with a seeded selector)
    pub fn with_word_service(mut self, words: WordService) -> Self {
        self.words = words;
        self
    }

    /// Mark the service as accepting requests
    pub async fn start(&self) {
        *self.is_running.write().await = true;
        info!("✅ Scrabble-words service marked as running");
    }

    /// Mark the service as shutting down
    pub async fn shutdown(&self) {
        *self.is_running.write().await = false;
        info!(
            "Scrabble-words service stopping after {}s",
            self.uptime().as_secs()
        );
    }

    /// Get service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check if service is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub fn repository(&self) -> Arc<dyn WordRepository> {
        self.repository.clone()
    }

    pub fn words(&self) -> &WordService {
        &self.words
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

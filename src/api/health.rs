//! Health check and Prometheus metrics endpoints

use crate::service::{AppState, HealthCheck, HealthStatus};
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Root endpoint handler - shows service information
pub async fn root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let info = json!({
        "service": state.config().service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/random-word",
            "/valid-word",
            "/health",
            "/ready",
            "/alive",
            "/metrics",
            "/stats"
        ]
    });

    Json(info)
}

/// Lightweight health check endpoint handler
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Health check requested");

    let service = state.config().service.name.clone();
    match HealthCheck::liveness_check(state).await {
        Ok(HealthStatus::Healthy) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": service,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": service,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
    }
}

/// Readiness check endpoint handler
pub async fn ready_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Readiness check requested");

    match HealthCheck::readiness_check(state).await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "Ready"),
        Ok(HealthStatus::Degraded) => (StatusCode::OK, "Degraded but ready"),
        Ok(HealthStatus::Unhealthy) => (StatusCode::SERVICE_UNAVAILABLE, "Not ready"),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Not ready")
        }
    }
}

/// Liveness check endpoint handler
pub async fn alive_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match HealthCheck::liveness_check(state).await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "Alive"),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "Not alive"),
    }
}

/// Prometheus metrics endpoint handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Metrics endpoint requested");

    let metrics = state.metrics();
    metrics.update_uptime(state.uptime());

    match encode_metrics(&state) {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            output,
        ),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain".to_string())],
                "Failed to encode metrics".to_string(),
            )
        }
    }
}

/// Render every registered metric in Prometheus text format
pub fn encode_metrics(state: &AppState) -> Result<String> {
    let metric_families = state.metrics().registry().gather();
    TextEncoder::new()
        .encode_to_string(&metric_families)
        .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))
}

/// Detailed service statistics endpoint handler
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Stats endpoint requested");

    let service = state.config().service.name.clone();
    match HealthCheck::check(state).await {
        Ok(health) => {
            let status = if health.status == HealthStatus::Unhealthy {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::OK
            };

            let stats = json!({
                "service": {
                    "name": service,
                    "version": env!("CARGO_PKG_VERSION"),
                    "status": health.status,
                    "uptime_seconds": health.stats.uptime_seconds
                },
                "words": {
                    "total": health.stats.total_words
                },
                "components": health.checks,
                "timestamp": chrono::Utc::now()
            });

            (status, Json(stats))
        }
        Err(e) => {
            error!("Failed to get stats: {}", e);

            let error_response = json!({
                "service": {
                    "name": service,
                    "version": env!("CARGO_PKG_VERSION"),
                    "status": "error"
                },
                "error": "Failed to get service stats",
                "timestamp": chrono::Utc::now()
            });

            (StatusCode::SERVICE_UNAVAILABLE, Json(error_response))
        }
    }
}

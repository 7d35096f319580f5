//! HTTP surface of the scrabble-words service
//!
//! This module wires the word lookup endpoints together with health checks
//! and Prometheus metrics into one Axum router and serves it.

pub mod health;
pub mod words;

use crate::service::AppState;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Build the router with every endpoint
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/random-word", get(words::random_word_handler))
        .route("/valid-word", get(words::valid_word_handler))
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/ready", get(health::ready_handler))
        .route("/alive", get(health::alive_handler))
        .route("/metrics", get(health::metrics_handler))
        .route("/stats", get(health::stats_handler))
        .with_state(state)
}

/// HTTP server for word lookups and monitoring
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiServer {
    pub fn new(config: ApiServerConfig, state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Bind and serve until [`stop`](Self::stop) is called
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid API server address")?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let app = create_router(self.state.clone());
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        info!("API server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Stop the server; also effective if called before serving starts
    pub fn stop(&self) {
        info!("Stopping API server...");
        self.shutdown_tx.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repository::InMemoryWordRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt; // for oneshot

    async fn create_state(running: bool) -> Arc<AppState> {
        let state = AppState::with_repository(
            AppConfig::default(),
            Arc::new(InMemoryWordRepository::from_words(&["cat", "dog", "horse"])),
        )
        .unwrap();
        if running {
            state.start().await;
        }
        Arc::new(state)
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = create_router(create_state(true).await);
        assert_eq!(get_status(app, "/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoints_when_running() {
        let app = create_router(create_state(true).await);

        assert_eq!(get_status(app.clone(), "/health").await, StatusCode::OK);
        assert_eq!(get_status(app.clone(), "/ready").await, StatusCode::OK);
        assert_eq!(get_status(app.clone(), "/alive").await, StatusCode::OK);
        assert_eq!(get_status(app, "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoints_when_not_running() {
        let app = create_router(create_state(false).await);

        assert_eq!(
            get_status(app.clone(), "/health").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(app.clone(), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(app.clone(), "/alive").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(app, "/stats").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = create_state(true).await;
        let app = create_router(state.clone());

        assert_eq!(
            get_status(app.clone(), "/random-word").await,
            StatusCode::OK
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("text/plain"));

        let text = encode_metrics_text(&state);
        assert!(text.contains("scrabble_words_requests_total"));
    }

    fn encode_metrics_text(state: &AppState) -> String {
        health::encode_metrics(state).unwrap()
    }

    #[tokio::test]
    async fn test_404_handling() {
        let app = create_router(create_state(true).await);
        assert_eq!(get_status(app, "/nonexistent").await, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_server_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[tokio::test]
    async fn test_server_serves_and_stops() {
        let server = Arc::new(ApiServer::new(
            ApiServerConfig::default(),
            create_state(true).await,
        ));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let handle = {
            let server = server.clone();
            tokio::spawn(async move { server.serve(listener).await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        server.stop();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}

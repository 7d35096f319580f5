//! Word lookup endpoints
//!
//! `GET /random-word[?length=N]` and `GET /valid-word?word=W`. Both answer
//! with the `{success, data, message}` envelope. A repeated parameter is not
//! a rejection: the last occurrence wins.

use crate::error::WordServiceError;
use crate::service::AppState;
use crate::types::{Envelope, RandomWordInfo, WordInfo};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const RANDOM_WORD_ENDPOINT: &str = "random_word";
pub const VALID_WORD_ENDPOINT: &str = "valid_word";

const LENGTH_PARAM: &str = "length";
const WORD_PARAM: &str = "word";

type QueryParams = HashMap<String, String>;

/// Random word handler
pub async fn random_word_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Envelope<RandomWordInfo>>, WordServiceError> {
    let request_id = Uuid::new_v4();
    let timer = state.metrics().start_timer();
    let length = params.get(LENGTH_PARAM).map(String::as_str);

    let result = state.words().random_word(length).await;

    record_outcome(
        &state,
        RANDOM_WORD_ENDPOINT,
        request_id,
        &result,
        timer.stop(),
    );
    if let Ok(info) = &result {
        info!(
            "[{}] random word served - length filter: {:?}, word: '{}'",
            request_id, length, info.word
        );
    }

    result.map(|info| Json(Envelope::success(info)))
}

/// Word validation handler
pub async fn valid_word_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Envelope<WordInfo>>, WordServiceError> {
    let request_id = Uuid::new_v4();
    let timer = state.metrics().start_timer();

    let result = state
        .words()
        .check_word(params.get(WORD_PARAM).map(String::as_str))
        .await;

    record_outcome(&state, VALID_WORD_ENDPOINT, request_id, &result, timer.stop());
    if let Ok(info) = &result {
        info!(
            "[{}] word checked - word: '{}', valid: {}",
            request_id, info.word, info.valid_word
        );
    }

    result.map(|info| Json(Envelope::success(info)))
}

fn record_outcome<T>(
    state: &AppState,
    endpoint: &str,
    request_id: Uuid,
    result: &Result<T, WordServiceError>,
    duration: std::time::Duration,
) {
    let metrics = state.metrics();

    let status = match result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            if let WordServiceError::InvalidInput { message } = e {
                metrics.record_invalid_request(endpoint);
                warn!("[{}] {} rejected: {}", request_id, endpoint, message);
            }
            e.status_code()
        }
    };

    metrics.record_request(endpoint, status.as_u16(), duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repository::{InMemoryWordRepository, MockWordRepository};
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt; // for oneshot

    fn create_router(repository: Arc<dyn crate::repository::WordRepository>) -> Router {
        let state = Arc::new(AppState::with_repository(AppConfig::default(), repository).unwrap());
        Router::new()
            .route("/random-word", get(random_word_handler))
            .route("/valid-word", get(valid_word_handler))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_random_word_single_candidate() {
        let app = create_router(Arc::new(InMemoryWordRepository::from_words(&[
            "cat", "horse",
        ])));

        let (status, body) = get_json(app, "/random-word?length=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "data": {"word": "cat", "length": 3},
                "message": "success"
            })
        );
    }

    #[tokio::test]
    async fn test_empty_length_param_is_rejected() {
        let app = create_router(Arc::new(InMemoryWordRepository::from_words(&["cat"])));

        let (status, body) = get_json(app, "/random-word?length=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Length must be between 1 and 15 inclusive");
    }

    #[tokio::test]
    async fn test_repeated_params_answer_with_envelope() {
        let app = create_router(Arc::new(InMemoryWordRepository::from_words(&[
            "cat", "dog", "horse",
        ])));

        let (status, body) = get_json(app.clone(), "/random-word?length=3&length=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!({"word": "horse", "length": 5}));

        let (status, body) = get_json(app, "/random-word?length=3&length=99").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Length must be between 1 and 15 inclusive");
    }

    #[tokio::test]
    async fn test_valid_word_present() {
        let app = create_router(Arc::new(InMemoryWordRepository::from_words(&["cat"])));

        let (status, body) = get_json(app, "/valid-word?word=cat").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["validWord"], true);
        assert_eq!(body["data"]["message"], "'cat' is a valid Scrabble word!");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500_envelope() {
        let mut mock = MockWordRepository::new();
        mock.expect_fetch_exact()
            .returning(|_| Err(WordServiceError::storage("server has gone away")));
        let app = create_router(Arc::new(mock));

        let (status, body) = get_json(app, "/valid-word?word=cat").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "data": {},
                "message": "Internal server error"
            })
        );
    }
}

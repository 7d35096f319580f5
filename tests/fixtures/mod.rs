//! Test fixtures and repository implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use scrabble_words::config::AppConfig;
use scrabble_words::error::{Result, WordServiceError};
use scrabble_words::repository::{InMemoryWordRepository, WordRepository};
use scrabble_words::service::AppState;
use scrabble_words::types::WordRecord;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A small dictionary with a known number of words per length
pub const DICTIONARY: &[&str] = &[
    "cat", "ox", "zebra", "quixotic", "jazz", "syzygy", "aa", "qi", "horse", "fjord",
    "rhythm", "zymurgy", "kibbutz", "muzjiks", "xylophones",
];

/// Repository whose every operation fails like an unreachable store
#[derive(Debug, Default)]
pub struct FailingWordRepository;

#[async_trait]
impl WordRepository for FailingWordRepository {
    async fn count_matching(&self, _length_filter: Option<i64>) -> Result<i64> {
        Err(WordServiceError::storage("Can't connect to MySQL server"))
    }

    async fn fetch_at_offset(
        &self,
        _offset: i64,
        _length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>> {
        Err(WordServiceError::storage("Can't connect to MySQL server"))
    }

    async fn fetch_exact(&self, _word: &str) -> Result<Vec<WordRecord>> {
        Err(WordServiceError::storage("Can't connect to MySQL server"))
    }

    async fn ping(&self) -> Result<()> {
        Err(WordServiceError::storage("Can't connect to MySQL server"))
    }
}

/// Repository that counts calls before delegating to an in-memory dictionary
#[derive(Debug, Default)]
pub struct RecordingWordRepository {
    inner: InMemoryWordRepository,
    count_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    exact_calls: AtomicUsize,
}

impl RecordingWordRepository {
    pub fn new(words: &[&str]) -> Self {
        Self {
            inner: InMemoryWordRepository::from_words(words),
            ..Self::default()
        }
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn exact_calls(&self) -> usize {
        self.exact_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordRepository for RecordingWordRepository {
    async fn count_matching(&self, length_filter: Option<i64>) -> Result<i64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count_matching(length_filter).await
    }

    async fn fetch_at_offset(
        &self,
        offset: i64,
        length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_at_offset(offset, length_filter).await
    }

    async fn fetch_exact(&self, word: &str) -> Result<Vec<WordRecord>> {
        self.exact_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_exact(word).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }
}

/// Build a running application state over the given repository
pub async fn create_app_state(repository: Arc<dyn WordRepository>) -> Arc<AppState> {
    let state = AppState::with_repository(AppConfig::default(), repository)
        .expect("Failed to create app state");
    state.start().await;
    Arc::new(state)
}

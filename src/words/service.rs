//! Word lookup service
//!
//! Implements the two request flows (validate, query, respond) without any
//! knowledge of HTTP. The API layer wraps the results in envelopes.

use crate::error::{Result, WordServiceError};
use crate::metrics::MetricsCollector;
use crate::repository::WordRepository;
use crate::types::{
    RandomWordInfo, WordInfo, INVALID_LENGTH_MESSAGE, MAX_LENGTH_FILTER, MIN_LENGTH_FILTER,
    MISSING_WORD_MESSAGE,
};
use crate::words::selection::RandomSelector;
use std::sync::Arc;
use tracing::debug;

/// Parse the raw `length` query parameter.
///
/// Absent means no filter. Anything that is not an integer in
/// `[MIN_LENGTH_FILTER, MAX_LENGTH_FILTER]` is rejected.
pub fn parse_length_filter(raw: Option<&str>) -> Result<Option<i64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let length: i64 = raw
        .parse()
        .map_err(|_| WordServiceError::invalid_input(INVALID_LENGTH_MESSAGE))?;

    if !(MIN_LENGTH_FILTER..=MAX_LENGTH_FILTER).contains(&length) {
        return Err(WordServiceError::invalid_input(INVALID_LENGTH_MESSAGE));
    }

    Ok(Some(length))
}

/// Random word and word validation lookups over a shared repository
pub struct WordService {
    repository: Arc<dyn WordRepository>,
    selector: RandomSelector,
    metrics: Arc<MetricsCollector>,
}

impl WordService {
    pub fn new(repository: Arc<dyn WordRepository>, metrics: Arc<MetricsCollector>) -> Self {
        let selector = RandomSelector::new(repository.clone());
        Self::with_selector(repository, selector, metrics)
    }

    /// Use a caller-provided selector (e.g. a seeded one)
    pub fn with_selector(
        repository: Arc<dyn WordRepository>,
        selector: RandomSelector,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            repository,
            selector,
            metrics,
        }
    }

    /// Pick a random word, optionally of the given length.
    ///
    /// An empty selection is a success with an empty word.
    pub async fn random_word(&self, length: Option<&str>) -> Result<RandomWordInfo> {
        let length_filter = parse_length_filter(length)?;

        let record = self.selector.select(length_filter).await?;
        self.metrics
            .record_selection(length_filter.is_some(), record.is_some());

        Ok(RandomWordInfo::from_selection(record))
    }

    /// Check whether `word` is in the dictionary.
    ///
    /// Valid only when exactly one record matches.
    pub async fn check_word(&self, word: Option<&str>) -> Result<WordInfo> {
        let word = word.ok_or_else(|| WordServiceError::invalid_input(MISSING_WORD_MESSAGE))?;

        let matches = self.repository.fetch_exact(word).await?;
        if matches.len() > 1 {
            debug!("'{}' matched {} records", word, matches.len());
        }

        let valid = matches.len() == 1;
        self.metrics.record_validation(valid);

        Ok(WordInfo::new(word, valid))
    }

    /// Total number of words in the dictionary
    pub async fn total_words(&self) -> Result<i64> {
        self.repository.count_matching(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryWordRepository, MockWordRepository};
    use crate::types::WordRecord;

    fn create_service(words: &[&str]) -> WordService {
        let repository = Arc::new(InMemoryWordRepository::from_words(words));
        let metrics = Arc::new(MetricsCollector::new().unwrap());
        WordService::new(repository, metrics)
    }

    fn assert_invalid_length(result: Result<Option<i64>>) {
        match result {
            Err(WordServiceError::InvalidInput { message }) => {
                assert_eq!(message, INVALID_LENGTH_MESSAGE)
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_length_filter_bounds() {
        assert_eq!(parse_length_filter(None).unwrap(), None);
        assert_eq!(parse_length_filter(Some("0")).unwrap(), Some(0));
        assert_eq!(parse_length_filter(Some("7")).unwrap(), Some(7));
        assert_eq!(parse_length_filter(Some("15")).unwrap(), Some(15));

        assert_invalid_length(parse_length_filter(Some("16")));
        assert_invalid_length(parse_length_filter(Some("-1")));
        assert_invalid_length(parse_length_filter(Some("20")));
    }

    #[test]
    fn test_parse_length_filter_rejects_non_integers() {
        assert_invalid_length(parse_length_filter(Some("")));
        assert_invalid_length(parse_length_filter(Some("three")));
        assert_invalid_length(parse_length_filter(Some("3.5")));
        assert_invalid_length(parse_length_filter(Some(" 3")));
    }

    #[tokio::test]
    async fn test_random_word_with_single_match() {
        let service = create_service(&["cat", "horse", "aardvark"]);

        let info = service.random_word(Some("3")).await.unwrap();
        assert_eq!(info.word, "cat");
        assert_eq!(info.length, 3);
    }

    #[tokio::test]
    async fn test_random_word_without_filter() {
        let service = create_service(&["cat", "horse", "aardvark"]);

        let info = service.random_word(None).await.unwrap();
        assert!(["cat", "horse", "aardvark"].contains(&info.word.as_str()));
        assert_eq!(info.length, info.word.chars().count());
    }

    #[tokio::test]
    async fn test_random_word_empty_selection() {
        let service = create_service(&["cat"]);

        let info = service.random_word(Some("0")).await.unwrap();
        assert_eq!(info, RandomWordInfo::default());
    }

    #[tokio::test]
    async fn test_random_word_rejects_before_querying() {
        let mut mock = MockWordRepository::new();
        mock.expect_count_matching().never();
        let service = WordService::new(
            Arc::new(mock),
            Arc::new(MetricsCollector::new().unwrap()),
        );

        let err = service.random_word(Some("16")).await.unwrap_err();
        assert!(matches!(err, WordServiceError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_random_word_length_ignores_stored_length() {
        let repository = Arc::new(InMemoryWordRepository::new(vec![WordRecord {
            id: 1,
            updated_at: "2021-03-14 09:26:53".to_string(),
            word: "quiz".to_string(),
            length: 6,
        }]));
        let service = WordService::new(repository, Arc::new(MetricsCollector::new().unwrap()));

        let info = service.random_word(Some("6")).await.unwrap();
        assert_eq!(info.word, "quiz");
        assert_eq!(info.length, 4);
    }

    #[tokio::test]
    async fn test_check_word() {
        let service = create_service(&["cat", "dog"]);

        let valid = service.check_word(Some("cat")).await.unwrap();
        assert!(valid.valid_word);
        assert_eq!(valid.message, "'cat' is a valid Scrabble word!");

        let invalid = service.check_word(Some("xyzzy")).await.unwrap();
        assert!(!invalid.valid_word);
        assert_eq!(invalid.word, "xyzzy");
        assert_eq!(invalid.message, "'xyzzy' is not a valid Scrabble word :(");
    }

    #[tokio::test]
    async fn test_check_word_missing_param() {
        let service = create_service(&["cat"]);

        match service.check_word(None).await {
            Err(WordServiceError::InvalidInput { message }) => {
                assert_eq!(message, MISSING_WORD_MESSAGE)
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_matches_are_invalid() {
        let service = create_service(&["cat", "cat"]);

        let info = service.check_word(Some("cat")).await.unwrap();
        assert!(!info.valid_word);
    }

    #[tokio::test]
    async fn test_check_word_storage_failure() {
        let mut mock = MockWordRepository::new();
        mock.expect_fetch_exact()
            .returning(|_| Err(WordServiceError::storage("too many connections")));
        let service = WordService::new(
            Arc::new(mock),
            Arc::new(MetricsCollector::new().unwrap()),
        );

        let err = service.check_word(Some("cat")).await.unwrap_err();
        assert!(matches!(err, WordServiceError::Storage { .. }));
    }
}

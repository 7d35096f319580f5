//! In-memory word repository
//!
//! Keeps records in insertion order, which plays the role of the table's
//! natural row order for offset-based selection.

use crate::error::{Result, WordServiceError};
use crate::repository::WordRepository;
use crate::types::WordRecord;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

/// In-memory dictionary of valid words
#[derive(Debug, Default)]
pub struct InMemoryWordRepository {
    words: RwLock<Vec<WordRecord>>,
}

impl InMemoryWordRepository {
    /// Create a repository holding the given records
    pub fn new(records: Vec<WordRecord>) -> Self {
        Self {
            words: RwLock::new(records),
        }
    }

    /// Create a repository from plain words, assigning ids and lengths
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let updated_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let records = words
            .iter()
            .enumerate()
            .map(|(index, word)| WordRecord {
                id: index as i64 + 1,
                updated_at: updated_at.clone(),
                word: word.as_ref().to_string(),
                length: word.as_ref().chars().count() as i64,
            })
            .collect();

        Self::new(records)
    }

    /// Append a record, as an out-of-band load would
    pub fn insert(&self, record: WordRecord) -> Result<()> {
        let mut words = self
            .words
            .write()
            .map_err(|_| WordServiceError::Internal {
                message: "Failed to acquire words write lock".to_string(),
            })?;

        words.push(record);
        Ok(())
    }

    fn read_words(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<WordRecord>>> {
        self.words.read().map_err(|_| WordServiceError::Internal {
            message: "Failed to acquire words read lock".to_string(),
        })
    }
}

fn matches_filter(record: &WordRecord, length_filter: Option<i64>) -> bool {
    length_filter.map_or(true, |length| record.length == length)
}

#[async_trait]
impl WordRepository for InMemoryWordRepository {
    async fn count_matching(&self, length_filter: Option<i64>) -> Result<i64> {
        let words = self.read_words()?;

        let count = words
            .iter()
            .filter(|record| matches_filter(record, length_filter))
            .count();

        Ok(count as i64)
    }

    async fn fetch_at_offset(
        &self,
        offset: i64,
        length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>> {
        let Ok(offset) = usize::try_from(offset) else {
            return Ok(None);
        };

        let words = self.read_words()?;

        Ok(words
            .iter()
            .filter(|record| matches_filter(record, length_filter))
            .nth(offset)
            .cloned())
    }

    async fn fetch_exact(&self, word: &str) -> Result<Vec<WordRecord>> {
        let words = self.read_words()?;

        Ok(words
            .iter()
            .filter(|record| record.word == word)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.read_words().map(|_| ())
    }
}

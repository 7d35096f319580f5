//! Common types used throughout the word service

use serde::{Deserialize, Serialize};

/// Smallest accepted value of the `length` query parameter
pub const MIN_LENGTH_FILTER: i64 = 0;

/// Largest accepted value of the `length` query parameter
pub const MAX_LENGTH_FILTER: i64 = 15;

/// Returned when `length` does not parse or falls outside the accepted range.
/// The wording says 1 while 0 is accepted; both are kept as-is.
pub const INVALID_LENGTH_MESSAGE: &str = "Length must be between 1 and 15 inclusive";

/// Returned when the validation endpoint is called without `word`
pub const MISSING_WORD_MESSAGE: &str = "Must have 'word' as query param";

/// Top-level message of every successful envelope
pub const SUCCESS_MESSAGE: &str = "success";

/// A single dictionary entry as stored in the `ValidWords` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: i64,
    /// Last modification time, kept for provenance only
    #[serde(rename = "updated")]
    pub updated_at: String,
    pub word: String,
    /// Trusted from storage, never recomputed
    #[serde(rename = "word_length")]
    pub length: i64,
}

/// Payload of the random word endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomWordInfo {
    pub word: String,
    pub length: usize,
}

impl RandomWordInfo {
    /// Build the payload for a selected record (or an empty selection).
    ///
    /// `length` is the character count of the returned word, not the stored
    /// `word_length` and not the requested filter.
    pub fn from_selection(record: Option<WordRecord>) -> Self {
        match record {
            Some(record) => Self {
                length: record.word.chars().count(),
                word: record.word,
            },
            None => Self::default(),
        }
    }
}

/// Payload of the word validation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInfo {
    #[serde(rename = "validWord")]
    pub valid_word: bool,
    pub word: String,
    pub message: String,
}

impl WordInfo {
    pub fn new(word: &str, valid_word: bool) -> Self {
        let message = if valid_word {
            format!("'{}' is a valid Scrabble word!", word)
        } else {
            format!("'{}' is not a valid Scrabble word :(", word)
        };

        Self {
            valid_word,
            word: word.to_string(),
            message,
        }
    }
}

/// Empty `data` object carried by failure envelopes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyData {}

/// JSON wrapper returned by every word endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl Envelope<EmptyData> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: EmptyData::default(),
            message: message.into(),
        }
    }
}

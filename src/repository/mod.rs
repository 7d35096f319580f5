//! Word repository interface and implementations
//!
//! All reads against the word table go through [`WordRepository`]. The
//! MySQL implementation opens one connection per call; the in-memory one
//! backs tests, benches and local runs.

pub mod memory;
pub mod metered;
pub mod mysql;

pub use memory::InMemoryWordRepository;
pub use metered::MeteredWordRepository;
pub use mysql::MySqlWordRepository;

use crate::error::Result;
use crate::types::WordRecord;
use async_trait::async_trait;

/// Read-only access to the dictionary of valid words.
///
/// `count_matching` and `fetch_at_offset` must agree on ordering so an
/// offset drawn from `[0, count)` addresses a real row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Number of records whose length equals `length_filter`, or all records
    async fn count_matching(&self, length_filter: Option<i64>) -> Result<i64>;

    /// Record at zero-based `offset` within the (optionally filtered) set.
    ///
    /// An empty set or an out-of-range offset is `Ok(None)`, not an error.
    async fn fetch_at_offset(
        &self,
        offset: i64,
        length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>>;

    /// All records whose word equals `word` exactly
    async fn fetch_exact(&self, word: &str) -> Result<Vec<WordRecord>>;

    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<()>;
}

//! Random word selection
//!
//! Count the matching rows, draw an offset uniformly from `[0, count)`, then
//! fetch the row at that offset. Storage does the skipping; nothing beyond
//! one record is loaded.

use crate::error::{Result, WordServiceError};
use crate::repository::WordRepository;
use crate::types::WordRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Picks uniformly random words through a [`WordRepository`]
pub struct RandomSelector {
    repository: Arc<dyn WordRepository>,
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Create a selector whose generator is seeded once from OS entropy
    pub fn new(repository: Arc<dyn WordRepository>) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a selector with a fixed seed (reproducible draws)
    pub fn with_seed(repository: Arc<dyn WordRepository>, seed: u64) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw an offset uniformly from `[0, count)`.
    ///
    /// `count` must be positive.
    pub fn draw_offset(&self, count: i64) -> Result<i64> {
        if count <= 0 {
            return Err(WordServiceError::Internal {
                message: format!("Cannot draw an offset from an empty range ({})", count),
            });
        }

        let mut rng = self.rng.lock().map_err(|_| WordServiceError::Internal {
            message: "Failed to acquire random generator lock".to_string(),
        })?;

        Ok(rng.gen_range(0..count))
    }

    /// Select one word, optionally restricted to `length_filter`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn select(&self, length_filter: Option<i64>) -> Result<Option<WordRecord>> {
        let count = self.repository.count_matching(length_filter).await?;
        if count == 0 {
            debug!("No words match length filter {:?}", length_filter);
            return Ok(None);
        }

        let offset = self.draw_offset(count)?;
        debug!(
            "Selected offset {} of {} (length filter: {:?})",
            offset, count, length_filter
        );

        self.repository.fetch_at_offset(offset, length_filter).await
    }
}

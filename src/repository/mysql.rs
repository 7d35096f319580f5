//! MySQL-backed word repository
//!
//! Every call opens its own connection and closes it before returning,
//! whether the query succeeded or not.

use crate::config::DatabaseSettings;
use crate::error::{Result, WordServiceError};
use crate::repository::WordRepository;
use crate::types::WordRecord;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlRow};
use sqlx::{Connection, FromRow, MySqlConnection, Row};
use std::time::Duration;
use tracing::{debug, warn};

const COUNT_ALL: &str = "SELECT COUNT(*) FROM ValidWords";
const COUNT_BY_LENGTH: &str = "SELECT COUNT(*) FROM ValidWords WHERE word_length = ?";
const FETCH_AT_OFFSET: &str = "SELECT * FROM (SELECT * FROM ValidWords) AS dt LIMIT ?,1";
const FETCH_AT_OFFSET_BY_LENGTH: &str =
    "SELECT * FROM (SELECT * FROM ValidWords WHERE word_length = ?) AS dt LIMIT ?,1";
const FETCH_EXACT: &str = "SELECT * FROM ValidWords WHERE word = ?";

const UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Row shape of `ValidWords` (`id`, `updated`, `word`, `word_length`)
struct ValidWordRow(WordRecord);

/// Render `updated`, which may be a DATETIME/TIMESTAMP column or plain text
fn updated_text(
    timestamp: std::result::Result<NaiveDateTime, sqlx::Error>,
    as_text: impl FnOnce() -> std::result::Result<String, sqlx::Error>,
) -> std::result::Result<String, sqlx::Error> {
    match timestamp {
        Ok(timestamp) => Ok(timestamp.format(UPDATED_FORMAT).to_string()),
        Err(_) => as_text(),
    }
}

impl<'r> FromRow<'r, MySqlRow> for ValidWordRow {
    fn from_row(row: &'r MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        let updated_at = updated_text(row.try_get::<NaiveDateTime, _>("updated"), || {
            row.try_get::<String, _>("updated")
        })?;

        Ok(Self(WordRecord {
            id: row.try_get("id")?,
            updated_at,
            word: row.try_get("word")?,
            length: row.try_get("word_length")?,
        }))
    }
}

/// Word repository reading the `ValidWords` table
#[derive(Debug, Clone)]
pub struct MySqlWordRepository {
    options: MySqlConnectOptions,
    connect_timeout: Duration,
}

impl MySqlWordRepository {
    /// Build a repository from the `user:pass@host/database` address.
    ///
    /// No connection is made until the first query. Credentials containing
    /// URL-reserved characters must be percent-encoded.
    pub fn new(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        settings.host_and_port()?;

        let options = format!("mysql://{}", settings.address())
            .parse::<MySqlConnectOptions>()
            .with_context(|| {
                format!("Invalid word store address: {}", settings.redacted_address())
            })?;

        Ok(Self {
            options,
            connect_timeout: settings.connect_timeout(),
        })
    }

    async fn connect(&self) -> Result<MySqlConnection> {
        match tokio::time::timeout(
            self.connect_timeout,
            MySqlConnection::connect_with(&self.options),
        )
        .await
        {
            Ok(connection) => Ok(connection?),
            Err(_) => Err(WordServiceError::storage(format!(
                "Timed out connecting to word store after {:?}",
                self.connect_timeout
            ))),
        }
    }

    async fn release(connection: MySqlConnection) {
        if let Err(e) = connection.close().await {
            warn!("Failed to close word store connection: {}", e);
        }
    }
}

#[async_trait]
impl WordRepository for MySqlWordRepository {
    async fn count_matching(&self, length_filter: Option<i64>) -> Result<i64> {
        let mut connection = self.connect().await?;

        let result = match length_filter {
            Some(length) => {
                sqlx::query_scalar::<_, i64>(COUNT_BY_LENGTH)
                    .bind(length)
                    .fetch_one(&mut connection)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(COUNT_ALL)
                    .fetch_one(&mut connection)
                    .await
            }
        };

        Self::release(connection).await;

        let count = result?;
        debug!("Counted {} words (length filter: {:?})", count, length_filter);
        Ok(count)
    }

    async fn fetch_at_offset(
        &self,
        offset: i64,
        length_filter: Option<i64>,
    ) -> Result<Option<WordRecord>> {
        if offset < 0 {
            return Ok(None);
        }

        let mut connection = self.connect().await?;

        let result = match length_filter {
            Some(length) => {
                sqlx::query_as::<_, ValidWordRow>(FETCH_AT_OFFSET_BY_LENGTH)
                    .bind(length)
                    .bind(offset)
                    .fetch_optional(&mut connection)
                    .await
            }
            None => {
                sqlx::query_as::<_, ValidWordRow>(FETCH_AT_OFFSET)
                    .bind(offset)
                    .fetch_optional(&mut connection)
                    .await
            }
        };

        Self::release(connection).await;

        Ok(result?.map(|row| row.0))
    }

    async fn fetch_exact(&self, word: &str) -> Result<Vec<WordRecord>> {
        let mut connection = self.connect().await?;

        let result = sqlx::query_as::<_, ValidWordRow>(FETCH_EXACT)
            .bind(word)
            .fetch_all(&mut connection)
            .await;

        Self::release(connection).await;

        Ok(result?.into_iter().map(|row| row.0).collect())
    }

    async fn ping(&self) -> Result<()> {
        let mut connection = self.connect().await?;
        let result = connection.ping().await;
        Self::release(connection).await;
        Ok(result?)
    }
}

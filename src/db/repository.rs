use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{MatchRecord, MatchRow, StatusRow};
use crate::error::AppError;

/// Persistence of immutable match records, keyed by match id.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchRecord>, AppError>;

    /// Stores a record. A no-op when the id is already stored, the first
    /// written content is kept.
    async fn put_match(&self, record: &MatchRecord) -> Result<(), AppError>;
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // === Summary log ===

    pub async fn insert_summary(
        &self,
        ingame: bool,
        data: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO summaries (ingame, data, created_at) VALUES (?, ?, ?)")
            .bind(ingame)
            .bind(data)
            .bind(created_at.timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Time of the most recent summary recorded with the given `ingame` flag.
    pub async fn latest_summary_at(&self, ingame: bool) -> Result<Option<DateTime<Utc>>, AppError> {
        let millis = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(created_at) FROM summaries WHERE ingame = ?",
        )
        .bind(ingame)
        .fetch_one(&self.pool)
        .await?;

        Ok(millis.and_then(DateTime::from_timestamp_millis))
    }

    // === Status log ===

    pub async fn insert_status(
        &self,
        output: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO statuses (output, created_at) VALUES (?, ?)")
            .bind(output)
            .bind(created_at.timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn latest_statuses(&self, limit: i64) -> Result<Vec<StatusRow>, AppError> {
        let rows = sqlx::query_as::<_, StatusRow>(
            "SELECT id, output, created_at FROM statuses ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[cfg(test)]
    pub async fn count_summaries(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM summaries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl MatchStore for Repository {
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchRecord>, AppError> {
        let row = sqlx::query_as::<_, MatchRow>(
            "SELECT id, info, participants, won FROM matches WHERE id = ?",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MatchRecord::try_from).transpose()
    }

    async fn put_match(&self, record: &MatchRecord) -> Result<(), AppError> {
        let info = serde_json::to_string(&record.info)?;
        let participants = serde_json::to_string(&record.participants)?;

        sqlx::query(
            "INSERT OR IGNORE INTO matches (id, info, participants, won) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(info)
        .bind(participants)
        .bind(record.won)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

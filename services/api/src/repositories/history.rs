//! History repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::HistoryStore;
use crate::models::history::{History, HistoryChanges, NewHistory};

/// History repository for database operations
#[derive(Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    /// Create a new history repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for HistoryRepository {
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<History>> {
        let histories = sqlx::query_as::<_, History>(
            r#"
            SELECT id, title, url, last_visit, typed_count, visit_count,
                   created_at, updated_at, user_id
            FROM history
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(histories)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<History>> {
        info!("Finding history by ID: {}", id);

        let history = sqlx::query_as::<_, History>(
            r#"
            SELECT id, title, url, last_visit, typed_count, visit_count,
                   created_at, updated_at, user_id
            FROM history
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(history)
    }

    async fn create(&self, user_id: i64, new: &NewHistory) -> DatabaseResult<History> {
        info!("Creating history for user: {}", user_id);

        let history = sqlx::query_as::<_, History>(
            r#"
            INSERT INTO history (title, url, last_visit, typed_count, visit_count,
                                 created_at, updated_at, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, url, last_visit, typed_count, visit_count,
                      created_at, updated_at, user_id
            "#,
        )
        .bind(&new.title)
        .bind(&new.url)
        .bind(new.last_visit)
        .bind(new.typed_count)
        .bind(new.visit_count)
        .bind(new.created_at)
        .bind(new.updated_at)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(history)
    }

    async fn update(&self, id: i64, changes: &HistoryChanges) -> DatabaseResult<Option<History>> {
        info!("Updating history: {}", id);

        let history = sqlx::query_as::<_, History>(
            r#"
            UPDATE history
            SET title = COALESCE($2, title),
                url = COALESCE($3, url),
                last_visit = COALESCE($4, last_visit),
                typed_count = COALESCE($5, typed_count),
                visit_count = COALESCE($6, visit_count),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, url, last_visit, typed_count, visit_count,
                      created_at, updated_at, user_id
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.url)
        .bind(changes.last_visit)
        .bind(changes.typed_count)
        .bind(changes.visit_count)
        .fetch_optional(&self.pool)
        .await?;

        Ok(history)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting history: {}", id);

        let result = sqlx::query("DELETE FROM history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

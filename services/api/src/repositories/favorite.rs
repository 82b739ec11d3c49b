//! Favorite repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::FavoriteStore;
use crate::models::favorite::{Favorite, FavoriteChanges, NewFavorite};

/// Favorite repository for database operations
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favorite repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for FavoriteRepository {
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, index_id, title, url, user_id
            FROM favorite
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Favorite>> {
        info!("Finding favorite by ID: {}", id);

        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, index_id, title, url, user_id
            FROM favorite
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    async fn create(&self, user_id: i64, new: &NewFavorite) -> DatabaseResult<Favorite> {
        info!("Creating favorite for user: {}", user_id);

        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorite (index_id, title, url, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, index_id, title, url, user_id
            "#,
        )
        .bind(new.index_id)
        .bind(&new.title)
        .bind(&new.url)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(favorite)
    }

    async fn update(
        &self,
        id: i64,
        changes: &FavoriteChanges,
    ) -> DatabaseResult<Option<Favorite>> {
        info!("Updating favorite: {}", id);

        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            UPDATE favorite
            SET index_id = COALESCE($2, index_id),
                title = COALESCE($3, title),
                url = COALESCE($4, url)
            WHERE id = $1
            RETURNING id, index_id, title, url, user_id
            "#,
        )
        .bind(id)
        .bind(changes.index_id)
        .bind(&changes.title)
        .bind(&changes.url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting favorite: {}", id);

        let result = sqlx::query("DELETE FROM favorite WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

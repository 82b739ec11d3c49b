//! User repository for database operations

use async_trait::async_trait;
use common::{
    error::DatabaseResult,
    user::{USER_COLUMNS, User},
};
use sqlx::PgPool;
use tracing::info;

use super::UserStore;
use crate::models::user::{NewUser, ProfileChanges};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn list(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        info!("Finding user by ID: {}", id);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>> {
        self.find_one("username_canonical", canonical).await
    }

    async fn find_by_email_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>> {
        self.find_one("email_canonical", canonical).await
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, username_canonical, email, email_canonical, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.username)
        .bind(&new_user.username_canonical)
        .bind(&new_user.email)
        .bind(&new_user.email_canonical)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> DatabaseResult<Option<User>> {
        info!("Updating profile of user: {}", id);

        let (username, username_canonical) = changes.username.clone().unzip();
        let (email, email_canonical) = changes.email.clone().unzip();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                username_canonical = COALESCE($3, username_canonical),
                email = COALESCE($4, email),
                email_canonical = COALESCE($5, email_canonical)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(username_canonical)
        .bind(email)
        .bind(email_canonical)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

//! User repository for database operations

use async_trait::async_trait;
use common::{
    error::DatabaseResult,
    user::{USER_COLUMNS, User},
};
use sqlx::PgPool;
use tracing::info;

use super::CredentialStore;

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
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username_or_email(&self, canonical: &str) -> DatabaseResult<Option<User>> {
        info!("Finding user by username or email: {}", canonical);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username_canonical = $1 OR email_canonical = $1
            LIMIT 1
            "#
        ))
        .bind(canonical)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn record_login(&self, id: i64) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET last_login = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

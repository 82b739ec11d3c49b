//! Repositories for database operations

use async_trait::async_trait;
use common::{error::DatabaseResult, user::User};

pub mod user;

pub use user::UserRepository;

/// The slice of user storage the login flow needs
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user whose canonical username or canonical email is `canonical`
    async fn find_by_username_or_email(&self, canonical: &str) -> DatabaseResult<Option<User>>;

    /// Stamp `last_login` with the current time and return the updated user
    async fn record_login(&self, id: i64) -> DatabaseResult<Option<User>>;
}

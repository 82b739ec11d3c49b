//! Repositories for database operations
//!
//! Handlers talk to storage through the `*Store` traits; the PostgreSQL
//! implementations live in the submodules. Resources reference their owner
//! through `user_id` only, so a user's collection is always the result of a
//! query by owner and cannot drift from the resources themselves.

use async_trait::async_trait;
use common::{error::DatabaseResult, user::User};

use crate::models::{
    favorite::{Favorite, FavoriteChanges, NewFavorite},
    history::{History, HistoryChanges, NewHistory},
    user::{NewUser, ProfileChanges},
};

pub mod favorite;
pub mod history;
pub mod user;

pub use favorite::FavoriteRepository;
pub use history::HistoryRepository;
pub use user::UserRepository;

/// User storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id
    async fn list(&self) -> DatabaseResult<Vec<User>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>>;

    async fn find_by_username_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_email_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>>;

    /// Insert an enabled user without extra roles
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Apply profile changes; `None` when the user does not exist
    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> DatabaseResult<Option<User>>;
}

/// Favorite storage
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Favorites owned by `user_id`, ordered by id
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<Favorite>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Favorite>>;

    async fn create(&self, user_id: i64, new: &NewFavorite) -> DatabaseResult<Favorite>;

    /// Overwrite the supplied fields; `None` when the row does not exist
    async fn update(&self, id: i64, changes: &FavoriteChanges)
    -> DatabaseResult<Option<Favorite>>;

    /// `true` when a row was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// History storage
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// History entries owned by `user_id`, ordered by id
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<History>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<History>>;

    async fn create(&self, user_id: i64, new: &NewHistory) -> DatabaseResult<History>;

    /// Overwrite the supplied fields and stamp `updated_at`; `None` when the
    /// row does not exist
    async fn update(&self, id: i64, changes: &HistoryChanges) -> DatabaseResult<Option<History>>;

    /// `true` when a row was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

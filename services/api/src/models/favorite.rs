//! Favorite models for the API service

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{coerce, user::UserProjection};

/// Favorite row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub index_id: i64,
    pub title: String,
    pub url: String,
    pub user_id: i64,
}

/// Create payload; missing or malformed fields coerce instead of failing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    #[serde(default, deserialize_with = "coerce::int")]
    pub index_id: i64,
    #[serde(default, deserialize_with = "coerce::string")]
    pub title: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub url: String,
}

/// Partial update payload; only supplied fields are written
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteChanges {
    #[serde(default, deserialize_with = "coerce::opt_int")]
    pub index_id: Option<i64>,
    #[serde(default, deserialize_with = "coerce::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_string")]
    pub url: Option<String>,
}

/// Favorite as returned to clients, with its owner embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: i64,
    pub index_id: i64,
    pub title: String,
    pub url: String,
    pub user: UserProjection,
}

impl FavoriteResponse {
    pub fn new(favorite: Favorite, user: UserProjection) -> Self {
        Self {
            id: favorite.id,
            index_id: favorite.index_id,
            title: favorite.title,
            url: favorite.url,
            user,
        }
    }
}

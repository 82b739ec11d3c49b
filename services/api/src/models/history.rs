//! History models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{coerce, user::UserProjection};
use crate::config::TypedCountSource;

/// History row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct History {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub last_visit: f64,
    pub typed_count: i32,
    pub visit_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Create payload as sent by clients
///
/// Both spellings of the typed counter are captured; [`TypedCountSource`]
/// decides which one is stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryRequest {
    #[serde(default, deserialize_with = "coerce::string")]
    pub title: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub url: String,
    #[serde(default, deserialize_with = "coerce::float")]
    pub last_visit: f64,
    #[serde(default, deserialize_with = "coerce::int32")]
    pub visit_count: i32,
    #[serde(default, deserialize_with = "coerce::int32")]
    pub typed_count: i32,
    #[serde(default, deserialize_with = "coerce::int32")]
    pub type_count: i32,
}

impl CreateHistoryRequest {
    /// Resolve the stored fields, stamping both timestamps with `now`
    pub fn into_new(self, source: TypedCountSource, now: DateTime<Utc>) -> NewHistory {
        let typed_count = match source {
            TypedCountSource::Legacy => self.type_count,
            TypedCountSource::Corrected => self.typed_count,
        };

        NewHistory {
            title: self.title,
            url: self.url,
            last_visit: self.last_visit,
            typed_count,
            visit_count: self.visit_count,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A history entry ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistory {
    pub title: String,
    pub url: String,
    pub last_visit: f64,
    pub typed_count: i32,
    pub visit_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update payload; only supplied fields are written
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryChanges {
    #[serde(default, deserialize_with = "coerce::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    pub last_visit: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_int32")]
    pub typed_count: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int32")]
    pub visit_count: Option<i32>,
}

/// History entry as returned to clients, with its owner embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub id: i64,
    pub title: String,
    pub last_visit: f64,
    pub typed_count: i32,
    pub url: String,
    pub visit_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserProjection,
}

impl HistoryResponse {
    pub fn new(history: History, user: UserProjection) -> Self {
        Self {
            id: history.id,
            title: history.title,
            last_visit: history.last_visit,
            typed_count: history.typed_count,
            url: history.url,
            visit_count: history.visit_count,
            created_at: history.created_at,
            updated_at: history.updated_at,
            user,
        }
    }
}

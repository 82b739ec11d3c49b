//! User entity shared by the auth and API services

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Role every user holds, whether or not it is stored
pub const ROLE_DEFAULT: &str = "ROLE_USER";

/// Column list matching [`User`]'s `FromRow` layout
pub const USER_COLUMNS: &str = "id, username, username_canonical, email, email_canonical, \
     enabled, password_hash, last_login, roles";

/// User entity
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub username_canonical: String,
    pub email: String,
    pub email_canonical: String,
    pub enabled: bool,
    pub password_hash: String,
    pub last_login: Option<DateTime<Utc>>,
    /// Stored roles, without the implied [`ROLE_DEFAULT`]
    pub roles: Vec<String>,
}

impl User {
    /// Stored roles plus [`ROLE_DEFAULT`], deduplicated, in stored order
    pub fn effective_roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::with_capacity(self.roles.len() + 1);
        for role in self
            .roles
            .iter()
            .map(|r| r.to_uppercase())
            .chain(std::iter::once(ROLE_DEFAULT.to_string()))
        {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }
}

/// Canonical form of a username or email, used for uniqueness and lookup
pub fn canonicalize(value: &str) -> String {
    value.trim().to_lowercase()
}

//! User projection and the account forms

use chrono::{DateTime, Utc};
use common::user::User;
use serde::{Deserialize, Serialize};

/// Public view of a user; never carries credential material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub id: i64,
    pub username: String,
    pub username_canonical: String,
    pub email: String,
    pub email_canonical: String,
    pub last_login: Option<DateTime<Utc>>,
    pub roles: Vec<String>,
}

impl From<&User> for UserProjection {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            username_canonical: user.username_canonical.clone(),
            email: user.email.clone(),
            email_canonical: user.email_canonical.clone(),
            last_login: user.last_login,
            roles: user.effective_roles(),
        }
    }
}

/// Envelope used by the register and profile endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Repeated password field of the registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlainPassword {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub second: String,
}

/// Registration form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plain_password: PlainPassword,
}

/// Profile edit form; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, alias = "current_password")]
    pub current_password: String,
}

/// A validated user ready to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub username_canonical: String,
    pub email: String,
    pub email_canonical: String,
    pub password_hash: String,
}

/// Validated profile changes; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<(String, String)>,
    pub email: Option<(String, String)>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

//! Token payload and key loading shared by the issuer and the API
//!
//! The auth service signs tokens carrying [`Claims`]; the API service only
//! needs the public half of the key pair to resolve the caller.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i64,
    /// Display username at issue time
    #[serde(default)]
    pub username: String,
    /// Email at issue time
    #[serde(default)]
    pub email: String,
    /// Last login recorded when the token was issued
    #[serde(default, rename = "lastLogin")]
    pub last_login: Option<DateTime<Utc>>,
    /// User roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Issued at time
    #[serde(default)]
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

impl Claims {
    /// Build the claims for `user`, valid for `ttl_seconds` from `now`
    pub fn for_user(user: &User, now: u64, ttl_seconds: u64) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            last_login: user.last_login,
            roles: user.effective_roles(),
            iat: now,
            exp: now + ttl_seconds,
        }
    }
}

/// Read a PEM key from the environment variable `var`
///
/// The value is either the PEM text itself or a path to a PEM file. Paths
/// are tried relative to the working directory, then to `manifest_dir`.
pub fn load_pem(var: &str, manifest_dir: &str) -> Result<String> {
    let value =
        std::env::var(var).map_err(|_| anyhow::anyhow!("{} environment variable not set", var))?;

    if value.starts_with("-----BEGIN") {
        return Ok(value);
    }

    let pem = std::fs::read_to_string(&value)
        .or_else(|_| {
            let mut path = std::path::PathBuf::from(manifest_dir);
            path.push(&value);
            std::fs::read_to_string(path)
        })
        .map_err(|e| anyhow::anyhow!("Failed to read key file for {}: {}", var, e))?;

    Ok(pem.trim().to_string())
}

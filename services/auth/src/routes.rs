//! Authentication service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{
    password::verify_password,
    user::{User, canonicalize},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::AppState;

/// Response for token generation
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// JSON login body; `_username` and `_password` are accepted as field names too
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "_username")]
    pub username: String,
    #[serde(default, alias = "_password")]
    pub password: String,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/login_check", post(login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Check `password` against a looked-up user
///
/// Unknown users, disabled users and wrong passwords are indistinguishable
/// to the caller.
pub fn authenticate(found: Option<User>, password: &str) -> Result<User, AuthError> {
    let user = found.ok_or(AuthError::Unauthorized)?;

    if !user.enabled {
        info!("Login refused for disabled user {}", user.id);
        return Err(AuthError::Unauthorized);
    }

    let valid = verify_password(password, &user.password_hash).map_err(|e| {
        error!("Stored password hash of user {} is unreadable: {}", user.id, e);
        AuthError::InternalServerError
    })?;

    if valid {
        Ok(user)
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(payload) = payload.map_err(|e| AuthError::BadRequest(e.body_text()))?;
    info!("Login attempt for user: {}", payload.username);

    let found = state
        .users
        .find_by_username_or_email(&canonicalize(&payload.username))
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?;

    let user = authenticate(found, &payload.password)?;

    let user = state
        .users
        .record_login(user.id)
        .await
        .map_err(|e| {
            error!("Failed to record login of user {}: {}", user.id, e);
            AuthError::InternalServerError
        })?
        .ok_or(AuthError::Unauthorized)?;

    let token = state.jwt_service.issue_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        AuthError::InternalServerError
    })?;

    info!("User {} logged in", user.id);

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.token_ttl(),
    }))
}

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bad credentials")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "code": status.as_u16(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

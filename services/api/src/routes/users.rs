//! User directory and account endpoints

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::parse_id;
use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::user::{DataResponse, ProfileForm, RegistrationForm, UserProjection},
    state::AppState,
};

/// List every user; no authentication required
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Response> {
    let users = state.users.list().await?;

    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let projections: Vec<UserProjection> = users.iter().map(UserProjection::from).collect();
    Ok(Json(projections).into_response())
}

/// The authenticated caller
pub async fn get_self(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserProjection> {
    Json(UserProjection::from(&user))
}

/// Get a user by ID; no authentication required
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserProjection>> {
    let id = parse_id(&id, "User not found")?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(UserProjection::from(&user)))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<UserProjection>>)> {
    let Json(form) = payload?;
    let user = state.accounts.register(form).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// Edit the caller's profile
pub async fn update_self(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<ProfileForm>, JsonRejection>,
) -> ApiResult<Json<DataResponse<UserProjection>>> {
    let Json(form) = payload?;
    let user = state.accounts.update_profile(&user, form).await?;

    Ok(Json(DataResponse { data: user }))
}

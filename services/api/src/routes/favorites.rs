//! Favorite endpoints, scoped to the authenticated caller

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;

use super::parse_id;
use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::{
        favorite::{FavoriteChanges, FavoriteResponse, NewFavorite},
        user::UserProjection,
    },
    ownership::{Access, FAVORITE, owned_by},
    state::AppState,
};

/// All favorites of the caller
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<FavoriteResponse>>> {
    let owner = UserProjection::from(&user);
    let favorites = state.favorites.list_by_owner(user.id).await?;

    Ok(Json(
        favorites
            .into_iter()
            .map(|favorite| FavoriteResponse::new(favorite, owner.clone()))
            .collect(),
    ))
}

/// One favorite of the caller
pub async fn get_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<FavoriteResponse>> {
    let id = parse_id(&id, FAVORITE.not_found)?;
    let found = state.favorites.find_by_id(id).await?;
    let favorite = owned_by(found, &user, FAVORITE, Access::Read)?;

    Ok(Json(FavoriteResponse::new(favorite, UserProjection::from(&user))))
}

/// Save a favorite for the caller
pub async fn create_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<NewFavorite>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FavoriteResponse>)> {
    let Json(new) = payload?;
    let favorite = state.favorites.create(user.id, &new).await?;
    info!("User {} saved favorite {}", user.id, favorite.id);

    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse::new(favorite, UserProjection::from(&user))),
    ))
}

/// Overwrite the supplied fields of one of the caller's favorites
pub async fn update_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: Result<Json<FavoriteChanges>, JsonRejection>,
) -> ApiResult<Json<FavoriteResponse>> {
    let id = parse_id(&id, FAVORITE.not_found)?;
    let Json(changes) = payload?;

    let found = state.favorites.find_by_id(id).await?;
    owned_by(found, &user, FAVORITE, Access::Write)?;

    let favorite = state
        .favorites
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound(FAVORITE.not_found))?;

    Ok(Json(FavoriteResponse::new(favorite, UserProjection::from(&user))))
}

/// Delete one of the caller's favorites
pub async fn delete_favorite(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, FAVORITE.not_found)?;
    let found = state.favorites.find_by_id(id).await?;
    owned_by(found, &user, FAVORITE, Access::Delete)?;

    if !state.favorites.delete(id).await? {
        return Err(ApiError::NotFound(FAVORITE.not_found));
    }
    info!("User {} deleted favorite {}", user.id, id);

    Ok(Json(json!({ "message": FAVORITE.deleted })))
}

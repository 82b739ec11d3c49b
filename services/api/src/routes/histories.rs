//! History endpoints, scoped to the authenticated caller

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use super::parse_id;
use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::{
        history::{CreateHistoryRequest, HistoryChanges, HistoryResponse},
        user::UserProjection,
    },
    ownership::{Access, HISTORY, owned_by},
    state::AppState,
};

pub async fn list_histories(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<HistoryResponse>>> {
    let owner = UserProjection::from(&user);
    let histories = state.histories.list_by_owner(user.id).await?;

    Ok(Json(
        histories
            .into_iter()
            .map(|history| HistoryResponse::new(history, owner.clone()))
            .collect(),
    ))
}

pub async fn get_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<HistoryResponse>> {
    let id = parse_id(&id, HISTORY.not_found)?;
    let found = state.histories.find_by_id(id).await?;
    let history = owned_by(found, &user, HISTORY, Access::Read)?;

    Ok(Json(HistoryResponse::new(history, UserProjection::from(&user))))
}

/// Record a page visit; `typedCount` comes from the configured field
pub async fn create_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<CreateHistoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HistoryResponse>)> {
    let Json(request) = payload?;
    let new = request.into_new(state.settings.typed_count_source, Utc::now());

    let history = state.histories.create(user.id, &new).await?;
    info!("User {} recorded history {}", user.id, history.id);

    Ok((
        StatusCode::CREATED,
        Json(HistoryResponse::new(history, UserProjection::from(&user))),
    ))
}

pub async fn update_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: Result<Json<HistoryChanges>, JsonRejection>,
) -> ApiResult<Json<HistoryResponse>> {
    let id = parse_id(&id, HISTORY.not_found)?;
    let Json(changes) = payload?;

    let found = state.histories.find_by_id(id).await?;
    owned_by(found, &user, HISTORY, Access::Write)?;

    let history = state
        .histories
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound(HISTORY.not_found))?;

    Ok(Json(HistoryResponse::new(history, UserProjection::from(&user))))
}

pub async fn delete_history(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, HISTORY.not_found)?;
    let found = state.histories.find_by_id(id).await?;
    owned_by(found, &user, HISTORY, Access::Delete)?;

    if !state.histories.delete(id).await? {
        return Err(ApiError::NotFound(HISTORY.not_found));
    }
    info!("User {} deleted history {}", user.id, id);

    Ok(Json(json!({ "message": HISTORY.deleted })))
}

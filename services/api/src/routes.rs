//! API service routes

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    error::{ApiError, ApiResult},
    middleware::auth_middleware,
    state::AppState,
};

pub mod favorites;
pub mod histories;
pub mod users;


/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users/self", get(users::get_self).patch(users::update_self))
        .route(
            "/users/self/favorite",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route(
            "/users/self/favorite/:id",
            get(favorites::get_favorite)
                .patch(favorites::update_favorite)
                .delete(favorites::delete_favorite),
        )
        .route(
            "/users/self/history",
            get(histories::list_histories).post(histories::create_history),
        )
        .route(
            "/users/self/history/:id",
            get(histories::get_history)
                .patch(histories::update_history)
                .delete(histories::delete_history),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/:id", get(users::get_user))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Parse a path id; text that is not an `i64` cannot name a row
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::NotFound(not_found))
}

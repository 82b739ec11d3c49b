//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    accounts::AccountManager,
    config::Settings,
    middleware::TokenDecoder,
    repositories::{FavoriteStore, HistoryStore, UserStore},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub favorites: Arc<dyn FavoriteStore>,
    pub histories: Arc<dyn HistoryStore>,
    pub accounts: Arc<dyn AccountManager>,
    pub tokens: Arc<TokenDecoder>,
    pub settings: Arc<Settings>,
}

//! In-memory stores and token helpers for unit and router tests

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use common::{
    error::DatabaseResult,
    jwt::Claims,
    password::hash_password,
    user::{User, canonicalize},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::{
    accounts::LocalAccountManager,
    config::{Settings, TypedCountSource},
    middleware::{JwtConfig, TokenDecoder},
    models::{
        favorite::{Favorite, FavoriteChanges, NewFavorite},
        history::{History, HistoryChanges, NewHistory},
        user::{NewUser, ProfileChanges},
    },
    repositories::{FavoriteStore, HistoryStore, UserStore},
    routes::create_router,
    state::AppState,
};

pub const PUBLIC_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../testdata/jwt-public.pem"
));

pub const PRIVATE_KEY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../testdata/jwt-private.pem"
));

/// Sign a token for `user` with the fixture key, valid for an hour
pub fn token_for(user: &User) -> String {
    let now = Utc::now().timestamp() as u64;
    let claims = Claims::for_user(user, now, 3600);
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
}

/// Sign a token for `user` that expired an hour ago
pub fn expired_token_for(user: &User) -> String {
    let issued = Utc::now().timestamp() as u64 - 7200;
    let claims = Claims::for_user(user, issued, 3600);
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
}

#[derive(Clone, Default)]
pub struct MemoryUsers {
    rows: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an enabled user with email `<username>@example.test`
    pub fn add_user(&self, username: &str, password: &str) -> User {
        let email = format!("{username}@example.test");
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: username.to_string(),
            username_canonical: canonicalize(username),
            email_canonical: canonicalize(&email),
            email,
            enabled: true,
            password_hash: hash_password(password).unwrap(),
            last_login: None,
            roles: Vec::new(),
        };
        self.rows.lock().unwrap().push(user.clone());
        user
    }

    pub fn list_snapshot(&self) -> Vec<User> {
        self.rows.lock().unwrap().clone()
    }

    pub fn remove(&self, id: i64) {
        self.rows.lock().unwrap().retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn list(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username_canonical == canonical)
            .cloned())
    }

    async fn find_by_email_canonical(&self, canonical: &str) -> DatabaseResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email_canonical == canonical)
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: new_user.username.clone(),
            username_canonical: new_user.username_canonical.clone(),
            email: new_user.email.clone(),
            email_canonical: new_user.email_canonical.clone(),
            enabled: true,
            password_hash: new_user.password_hash.clone(),
            last_login: None,
            roles: Vec::new(),
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> DatabaseResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some((username, canonical)) = &changes.username {
            user.username = username.clone();
            user.username_canonical = canonical.clone();
        }
        if let Some((email, canonical)) = &changes.email {
            user.email = email.clone();
            user.email_canonical = canonical.clone();
        }
        Ok(Some(user.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MemoryFavorites {
    rows: Arc<Mutex<Vec<Favorite>>>,
    next_id: Arc<AtomicI64>,
}

#[async_trait]
impl FavoriteStore for MemoryFavorites {
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<Favorite>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Favorite>> {
        Ok(self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn create(&self, user_id: i64, new: &NewFavorite) -> DatabaseResult<Favorite> {
        let favorite = Favorite {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            index_id: new.index_id,
            title: new.title.clone(),
            url: new.url.clone(),
            user_id,
        };
        self.rows.lock().unwrap().push(favorite.clone());
        Ok(favorite)
    }

    async fn update(
        &self,
        id: i64,
        changes: &FavoriteChanges,
    ) -> DatabaseResult<Option<Favorite>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|f| f.id == id).map(|favorite| {
            if let Some(index_id) = changes.index_id {
                favorite.index_id = index_id;
            }
            if let Some(title) = &changes.title {
                favorite.title.clone_from(title);
            }
            if let Some(url) = &changes.url {
                favorite.url.clone_from(url);
            }
            favorite.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| f.id != id);
        Ok(rows.len() != before)
    }
}

impl MemoryFavorites {
    pub fn contains(&self, id: i64) -> bool {
        self.rows.lock().unwrap().iter().any(|f| f.id == id)
    }
}

#[derive(Clone, Default)]
pub struct MemoryHistories {
    rows: Arc<Mutex<Vec<History>>>,
    next_id: Arc<AtomicI64>,
}

#[async_trait]
impl HistoryStore for MemoryHistories {
    async fn list_by_owner(&self, user_id: i64) -> DatabaseResult<Vec<History>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<History>> {
        Ok(self.rows.lock().unwrap().iter().find(|h| h.id == id).cloned())
    }

    async fn create(&self, user_id: i64, new: &NewHistory) -> DatabaseResult<History> {
        let history = History {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: new.title.clone(),
            url: new.url.clone(),
            last_visit: new.last_visit,
            typed_count: new.typed_count,
            visit_count: new.visit_count,
            created_at: new.created_at,
            updated_at: new.updated_at,
            user_id,
        };
        self.rows.lock().unwrap().push(history.clone());
        Ok(history)
    }

    async fn update(&self, id: i64, changes: &HistoryChanges) -> DatabaseResult<Option<History>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|h| h.id == id).map(|history| {
            if let Some(title) = &changes.title {
                history.title.clone_from(title);
            }
            if let Some(url) = &changes.url {
                history.url.clone_from(url);
            }
            if let Some(last_visit) = changes.last_visit {
                history.last_visit = last_visit;
            }
            if let Some(typed_count) = changes.typed_count {
                history.typed_count = typed_count;
            }
            if let Some(visit_count) = changes.visit_count {
                history.visit_count = visit_count;
            }
            history.updated_at = Utc::now();
            history.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|h| h.id != id);
        Ok(rows.len() != before)
    }
}

impl MemoryHistories {
    pub fn contains(&self, id: i64) -> bool {
        self.rows.lock().unwrap().iter().any(|h| h.id == id)
    }
}

/// A router wired to in-memory stores
pub struct TestApp {
    pub router: Router,
    pub users: MemoryUsers,
    pub favorites: MemoryFavorites,
    pub histories: MemoryHistories,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_typed_count_source(TypedCountSource::default())
    }

    pub fn with_typed_count_source(source: TypedCountSource) -> Self {
        let users = MemoryUsers::new();
        let favorites = MemoryFavorites::default();
        let histories = MemoryHistories::default();

        let decoder = TokenDecoder::new(&JwtConfig {
            public_key: PUBLIC_KEY.to_string(),
        })
        .unwrap();

        let state = AppState {
            users: Arc::new(users.clone()),
            favorites: Arc::new(favorites.clone()),
            histories: Arc::new(histories.clone()),
            accounts: Arc::new(LocalAccountManager::new(Arc::new(users.clone()))),
            tokens: Arc::new(decoder),
            settings: Arc::new(Settings {
                typed_count_source: source,
                ..Settings::default()
            }),
        };

        Self {
            router: create_router(state),
            users,
            favorites,
            histories,
        }
    }
}

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod accounts;
mod config;
mod error;
mod middleware;
mod models;
mod ownership;
mod repositories;
mod routes;
mod state;
mod validation;

#[cfg(test)]
mod test_support;

use common::database::{DatabaseConfig, init_pool, run_migrations};
use tokio::net::TcpListener;

use crate::{
    accounts::LocalAccountManager,
    config::Settings,
    middleware::{JwtConfig, TokenDecoder},
    repositories::{FavoriteRepository, HistoryRepository, UserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting API service");

    let settings = Settings::from_env()?;
    info!(
        "History typedCount is read from `{}`",
        settings.typed_count_source.field_name()
    );

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if db_config.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    let jwt_config = JwtConfig::from_env()?;
    let tokens = TokenDecoder::new(&jwt_config)?;

    // Initialize repositories
    let users = Arc::new(UserRepository::new(pool.clone()));
    let favorites = Arc::new(FavoriteRepository::new(pool.clone()));
    let histories = Arc::new(HistoryRepository::new(pool));

    let bind_address = settings.bind_address.clone();

    let app_state = AppState {
        users: users.clone(),
        favorites,
        histories,
        accounts: Arc::new(LocalAccountManager::new(users)),
        tokens: Arc::new(tokens),
        settings: Arc::new(settings),
    };

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&bind_address).await?;
    info!("API service listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Common library for the Wefaves services
//!
//! This crate provides the pieces shared by the auth and API services:
//! PostgreSQL connectivity and migrations, the storage error type, the user
//! entity, password hashing and the token payload.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     assert!(health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod jwt;
pub mod password;
pub mod user;

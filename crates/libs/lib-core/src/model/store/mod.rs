//! # Database Store
//!
//! Database connection pool, embedded migrations and repository implementations.

// region: --- Modules
pub mod models;
pub mod user_repository;
pub mod listing_repository;
pub mod pesticide_repository;
pub mod disease_repository;
pub mod order_repository;
pub mod seed;
// endregion: --- Modules

// region: --- Re-exports
pub use user_repository::UserRepository;
pub use listing_repository::{ListingFilter, ListingRepository};
pub use pesticide_repository::PesticideRepository;
pub use disease_repository::DiseaseRepository;
pub use order_repository::OrderRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations, embedded at compile time from `lib-core/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a new SQLite connection pool for `database_url`.
///
/// The database file is created when missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Fresh, migrated in-memory database. Used by tests across the workspace.
pub async fn create_memory_pool() -> anyhow::Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}
// endregion: --- Types and Functions

//! SQLite persistence layer for Nimbus.
//!
//! This crate provides async database operations for conversation history,
//! user profiles, and the admin-action audit log using SQLx with SQLite.
//! It holds no business logic: callers get plain CRUD plus the one aggregate
//! query (per-channel token sum) the memory layer needs.
//!
//! # Example
//!
//! ```no_run
//! use database::{conversation, Database, TurnRole};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:nimbus.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     conversation::insert_turn(
//!         db.pool(),
//!         "1001",
//!         "2002",
//!         "3003",
//!         "Alice",
//!         TurnRole::User,
//!         "hello",
//!         2,
//!     )
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod conversation;
pub mod error;
pub mod models;
pub mod profile;

pub use error::{DatabaseError, Result};
pub use models::{ActionKind, AdminActionRecord, ConversationTurn, TurnRole, UserProfile};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist, or
    /// `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up
    /// to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

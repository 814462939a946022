use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::error::AppError;

mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::{MatchRecord, StatusRow};
pub use repository::{MatchStore, Repository};

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    info!(database_url, "🗄️ Database connected");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Fresh in-memory database. A single connection that never expires, since
/// every new connection to `:memory:` is a distinct database.
#[cfg(test)]
pub(crate) async fn memory_repository() -> Repository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    Repository::new(pool)
}

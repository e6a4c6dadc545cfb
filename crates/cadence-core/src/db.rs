use crate::error::CoreError;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub use sqlx::SqlitePool as DbPool;

/// Opens the event store at `db_path` and brings its schema up to date.
///
/// The database file and any missing parent directories are created on first
/// use, so a fresh install needs no setup step. Embedded migrations run before
/// the pool is handed out; a failure at any point surfaces as a [`CoreError`].
pub async fn establish_connection(db_path: &str) -> Result<SqlitePool, CoreError> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    // sqlx won't create the file itself without a ?mode=rwc URL
    if !Path::new(db_path).exists() {
        tokio::fs::File::create(db_path).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_path)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub mod uploads;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// Embedded catalog migrations, shared by the server binary and tests
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open or create the SQLite catalog at the given path
pub async fn create_pool(database_path: impl AsRef<Path>) -> Result<SqlitePool, sqlx::Error> {
    let path = database_path.as_ref();
    tracing::info!("Opening catalog database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    tracing::info!("Catalog connection pool created successfully");

    Ok(pool)
}

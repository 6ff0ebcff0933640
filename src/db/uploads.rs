use sqlx::{Sqlite, SqlitePool};

use crate::error::Result;
use crate::models::UploadRecord;

/// Append an upload record and return its row id
///
/// Re-uploads of the same filename append rather than update, so the catalog
/// keeps the full upload history while the content store holds only the
/// latest bytes.
pub async fn insert(
    pool: &SqlitePool,
    filename: &str,
    user_id: i64,
    upload_time: &str,
) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO uploads (filename, user_id, upload_time) VALUES (?, ?, ?)")
            .bind(filename)
            .bind(user_id)
            .bind(upload_time)
            .execute(pool)
            .await?;

    Ok(result.last_insert_rowid())
}

/// Fetch the most recent upload record a user has for a filename
#[tracing::instrument(skip(pool))]
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: i64,
    filename: &str,
) -> Result<Option<UploadRecord>> {
    let record = sqlx::query_as::<Sqlite, UploadRecord>(
        "SELECT id, filename, user_id, upload_time FROM uploads \
         WHERE user_id = ? AND filename = ? ORDER BY id DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(filename)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

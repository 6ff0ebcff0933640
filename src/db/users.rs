use sqlx::{Sqlite, SqlitePool};

use crate::error::{AppError, Result};
use crate::models::User;

/// Check whether a username or email is already registered
#[tracing::instrument(skip(pool, email))]
pub async fn identity_taken(pool: &SqlitePool, username: &str, email: &str) -> Result<bool> {
    let taken = sqlx::query_scalar::<Sqlite, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? OR email = ?)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(taken)
}

/// Insert a new user and return the assigned row id
///
/// A UNIQUE violation on username or email maps to `AppError::DuplicateUser`
/// so concurrent signups racing past the pre-check still get the same answer.
pub async fn insert(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateUser;
                }
            }
            AppError::Database(e)
        })?;

    Ok(result.last_insert_rowid())
}

/// Fetch a user by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<Sqlite, User>(
        "SELECT id, username, email, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

use sqlx::FromRow;

/// User row as stored in the catalog
/// The password never appears here in plaintext, only its Argon2 PHC hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

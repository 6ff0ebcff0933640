use sqlx::FromRow;

/// Upload row as stored in the catalog
/// `filename` is the sanitized name the bytes live under in the content
/// store; `upload_time` is a formatted IST wall-clock string
#[derive(Debug, Clone, FromRow)]
pub struct UploadRecord {
    pub id: i64,
    pub filename: String,
    pub user_id: i64,
    pub upload_time: String,
}

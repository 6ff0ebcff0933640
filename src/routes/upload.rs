use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::constants::{ERR_NO_FILE_PART, ERR_UNSUPPORTED_FILE};
use crate::db;
use crate::error::{AppError, Result};
use crate::routes::validation::{ist_timestamp, validate_pdf_upload};
use crate::security::AuthUser;
use crate::store::sanitize_filename;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    /// Client-supplied names of the files accepted in this batch
    pub filename: Vec<String>,
}

/// Store one or more PDF documents for the authenticated user
///
/// Each `file` part is validated against the bytes actually received
/// (`.pdf` name, size ceiling, `%PDF` signature), written to the content
/// store under a sanitized name, and recorded in the catalog with an IST
/// timestamp. Re-uploading a name overwrites the stored bytes and appends
/// a fresh catalog record.
///
/// The first invalid file fails the whole request with 400; files already
/// written in the same batch stay written. Parts under any other field
/// name are ignored.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut accepted: Vec<String> = Vec::new();
    let mut saw_file_part = false;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        saw_file_part = true;

        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            // A file part with no filename carries nothing to store
            _ => continue,
        };

        let bytes = field.bytes().await?;

        validate_pdf_upload(&original_name, &bytes)?;

        let stored_name = sanitize_filename(&original_name)
            .ok_or_else(|| AppError::InvalidInput(ERR_UNSUPPORTED_FILE.to_string()))?;

        state.store.save(&stored_name, &bytes).await?;
        db::uploads::insert(&state.pool, &stored_name, user.user_id, &ist_timestamp()).await?;

        tracing::info!(
            user_id = user.user_id,
            filename = %stored_name,
            size_bytes = bytes.len(),
            "Stored uploaded document"
        );

        accepted.push(original_name);
    }

    if !saw_file_part {
        tracing::warn!(user_id = user.user_id, "Upload request without file part");
        return Err(AppError::InvalidInput(ERR_NO_FILE_PART.to_string()));
    }

    Ok(Json(UploadResponse {
        message: "Files uploaded successfully".to_string(),
        filename: accepted,
    }))
}

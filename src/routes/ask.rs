use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_FILENAME_REQUIRED, ERR_QUESTION_REQUIRED};
use crate::db;
use crate::error::{AppError, AppJson, Result};
use crate::security::AuthUser;
use crate::store::sanitize_filename;
use crate::AppState;

/// Explicit JSON null reads the same as a missing key
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    /// Name of a previously uploaded document to answer against
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Answer a question, optionally against one of the caller's documents
///
/// The active engine decides how much context it needs. The simulated
/// engine answers from its template alone and never touches the catalog.
/// The delegated engine requires a filename, verifies the caller actually
/// uploaded it (404 otherwise), loads the stored bytes and hands them over
/// for extraction and the upstream call.
pub async fn ask(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<AskRequest>,
) -> Result<Json<AskResponse>> {
    let question = payload.question.unwrap_or_default();
    if question.is_empty() {
        return Err(AppError::InvalidInput(ERR_QUESTION_REQUIRED.to_string()));
    }

    let document = if state.answerer.needs_document() {
        let requested = payload
            .filename
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput(ERR_FILENAME_REQUIRED.to_string()))?;

        // Lookups use the same sanitized form uploads were stored under
        let stored_name = sanitize_filename(requested)
            .ok_or_else(|| AppError::InvalidInput(ERR_FILENAME_REQUIRED.to_string()))?;

        let record = db::uploads::find_for_user(&state.pool, user.user_id, &stored_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No uploaded document named '{}'", stored_name))
            })?;

        Some(state.store.load(&record.filename).await?)
    } else {
        None
    };

    tracing::info!(
        user_id = user.user_id,
        engine = state.answerer.name(),
        "Answering question"
    );

    let answer = state
        .answerer
        .answer(&question, payload.filename.as_deref(), document.as_deref())
        .await?;

    Ok(Json(AskResponse { answer }))
}

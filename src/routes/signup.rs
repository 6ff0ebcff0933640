use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_FIELDS_REQUIRED, REDIRECT_AFTER_SIGNUP};
use crate::db;
use crate::error::{AppError, AppJson, Result};
use crate::security::hash_password;
use crate::AppState;

/// Explicit JSON null reads the same as a missing key
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub redirect: String,
}

/// Register a new user
///
/// All three fields must be present and non-empty, and both username and
/// email must be unused. The password is Argon2-hashed before it reaches
/// the catalog; plaintext is never stored.
///
/// Returns 400 for missing fields and for taken identities. A duplicate
/// that slips past the pre-check (two signups racing) is caught again by
/// the catalog's UNIQUE constraints and reported the same way.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if username.is_empty() || email.is_empty() || password.is_empty() {
        tracing::warn!("Signup rejected: missing fields");
        return Err(AppError::InvalidInput(ERR_FIELDS_REQUIRED.to_string()));
    }

    if db::users::identity_taken(&state.pool, &username, &email).await? {
        tracing::info!("Signup rejected: username or email already exists");
        return Err(AppError::DuplicateUser);
    }

    // Argon2 is CPU-bound, keep it off the async runtime
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let user_id = db::users::insert(&state.pool, &username, &email, &password_hash).await?;

    tracing::info!(user_id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful".to_string(),
            redirect: REDIRECT_AFTER_SIGNUP.to_string(),
        }),
    ))
}

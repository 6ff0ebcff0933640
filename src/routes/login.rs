use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::constants::{REDIRECT_AFTER_LOGIN, REDIRECT_AFTER_LOGOUT};
use crate::db;
use crate::error::{AppError, AppJson, Result};
use crate::security::{issue_token, verify_password, verify_password_dummy, AuthUser};
use crate::AppState;

/// Explicit JSON null reads the same as a missing key
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub redirect: String,
}

/// Authenticate a user and issue a bearer token
///
/// Every failure mode (unknown username, wrong password, empty fields)
/// returns the same 401 so the response does not reveal which usernames
/// exist. Unknown usernames still burn one Argon2 verification to keep
/// response timing in the same range as real failures.
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let stored = db::users::find_by_username(&state.pool, &username).await?;

    // Argon2 verification is CPU-bound, keep it off the async runtime
    let password_hash = stored.as_ref().map(|user| user.password_hash.clone());
    let verified = tokio::task::spawn_blocking(move || match password_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password_dummy(&password);
            false
        }
    })
    .await?;

    let user = match (verified, stored) {
        (true, Some(user)) => user,
        _ => {
            tracing::info!("Login rejected: invalid credentials");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = issue_token(
        user.id,
        &user.username,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    tracing::info!(user_id = user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        redirect: REDIRECT_AFTER_LOGIN.to_string(),
    }))
}

/// Log out the authenticated user
///
/// Tokens are stateless, so there is nothing to revoke server-side. The
/// endpoint confirms the token was valid and hands the client its redirect;
/// the token itself stays usable until natural expiry and the client is
/// expected to discard it.
pub async fn logout(user: AuthUser) -> Json<LogoutResponse> {
    tracing::info!(user_id = user.user_id, "Logout");

    Json(LogoutResponse {
        message: "Logout successful".to_string(),
        redirect: REDIRECT_AFTER_LOGOUT.to_string(),
    })
}

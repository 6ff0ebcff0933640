use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::AppState;

// =============================================================================
// Password Hashing (Argon2)
// =============================================================================

/// Parseable Argon2 hash that never verifies true
/// Used to equalize the work done for unknown-username and wrong-password
/// login failures so response timing does not reveal which usernames exist
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a password with Argon2id and a fresh random salt
///
/// Returns the PHC string encoding (algorithm, parameters, salt and digest)
/// that `verify_password` can later check against.
///
/// # Security Note
/// This is CPU-bound work (~tens of milliseconds). Call it through
/// `tokio::task::spawn_blocking` from async handlers.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC hash string
///
/// Returns false for wrong passwords and for unparseable stored hashes.
/// The underlying comparison is constant-time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(_) => {
            tracing::error!("Stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Burn one password verification against a throwaway hash
///
/// Called on login attempts for usernames that do not exist, so those
/// requests cost the same as a real failed verification.
pub fn verify_password_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_PASSWORD_HASH);
}

// =============================================================================
// Bearer Tokens (JWT, HS256)
// =============================================================================

/// Claims carried inside every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's catalog row id, as a decimal string
    pub sub: String,
    /// Username at the time the token was issued
    pub username: String,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed bearer token for a user
pub fn issue_token(
    user_id: i64,
    username: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Decode and validate a bearer token, returning its claims
///
/// Expired tokens get a distinct message; every other failure mode
/// (bad signature, malformed token, wrong algorithm) is reported uniformly.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token has expired".to_string())
        }
        _ => AppError::Unauthorized("Invalid token".to_string()),
    })
}

// =============================================================================
// Request Authentication
// =============================================================================

/// Authenticated caller, extracted from the Authorization header
///
/// Handlers that take an `AuthUser` argument reject requests without a
/// valid `Bearer` token before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.config.jwt_secret)?;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        Ok(AuthUser {
            user_id,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Password Hashing Tests
    // =========================================================================

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("right-password").unwrap();

        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("same-password").unwrap();
        let hash2 = hash_password("same-password").unwrap();

        // Fresh salt each time, so the encodings differ
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_rejects_malformed_stored_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_dummy_hash_never_verifies() {
        assert!(!verify_password("anything", DUMMY_PASSWORD_HASH));
        // And the timing-equalization helper must not panic
        verify_password_dummy("anything");
    }

    // =========================================================================
    // Token Tests
    // =========================================================================

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let token = issue_token(42, "mallory", "test-secret", 3600).unwrap();

        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "mallory");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(1, "alice", "secret-a", 3600).unwrap();

        let err = verify_token(&token, "secret-b").unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid token"),
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative TTL well past the default 60s decode leeway
        let token = issue_token(1, "alice", "test-secret", -120).unwrap();

        let err = verify_token(&token, "test-secret").unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, "Token has expired"),
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token("not.a.token", "test-secret").is_err());
        assert!(verify_token("", "test-secret").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue_token(7, "bob", "test-secret", 3600).unwrap();

        // Flip a character in the payload section
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        parts[1] = format!("x{}", &parts[1][1..]);
        let tampered = parts.join(".");

        assert!(verify_token(&tampered, "test-secret").is_err());
    }
}

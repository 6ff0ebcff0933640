//! StudyMate Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod answer;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use answer::AnswerEngine;
use constants::MAX_REQUEST_BODY_BYTES;
use store::ContentStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: Config,
    pub store: ContentStore,
    pub answerer: Arc<dyn AnswerEngine>,
}

/// Build the application router over the given state
///
/// Anything that is not an API route falls through to the static file
/// service rooted at the configured static directory, so the bundled
/// frontend pages are served from the same origin as the API.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/signup", post(routes::signup))
        .route("/api/login", post(routes::login))
        .route("/api/logout", post(routes::logout))
        .route("/api/upload", post(routes::upload))
        .route("/api/ask", post(routes::ask))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

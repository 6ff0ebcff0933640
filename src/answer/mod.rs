pub mod llm;
pub mod simulated;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AnswerEngineKind, Config};
use crate::error::{AppError, Result};

pub use llm::LlmAnswerer;
pub use simulated::SimulatedAnswerer;

/// Strategy for answering a question at the ask endpoint
///
/// Exactly one engine is active per process, chosen by configuration at
/// startup. Engines that answer from document content ask the route to
/// resolve the referenced upload first via `needs_document`.
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Engine name, for startup logging
    fn name(&self) -> &str;

    /// Whether this engine answers from stored document bytes
    ///
    /// When true, the ask route requires a filename, checks it against the
    /// caller's catalog records, and passes the stored bytes to `answer`.
    fn needs_document(&self) -> bool;

    /// Produce an answer to the question
    ///
    /// `filename` is the client-supplied document reference, if any;
    /// `document` is the stored bytes when `needs_document` requested them.
    async fn answer(
        &self,
        question: &str,
        filename: Option<&str>,
        document: Option<&[u8]>,
    ) -> Result<String>;
}

/// Build the engine selected by configuration
pub fn from_config(config: &Config) -> Result<Arc<dyn AnswerEngine>> {
    match config.answer_engine {
        AnswerEngineKind::Simulated => Ok(Arc::new(SimulatedAnswerer)),
        AnswerEngineKind::Llm => {
            let api_key = config.llm_api_key.clone().ok_or_else(|| {
                AppError::Internal("OPENAI_API_KEY is required for the llm engine".to_string())
            })?;

            let engine = LlmAnswerer::new(
                &config.llm_api_base_url,
                api_key,
                config.llm_model.clone(),
                config.llm_max_tokens,
            )?;

            Ok(Arc::new(engine))
        }
    }
}

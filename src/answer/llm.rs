use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AnswerEngine;
use crate::constants::{LLM_REQUEST_TIMEOUT_SECS, LLM_SYSTEM_PROMPT};
use crate::error::{AppError, Result};

/// Delegates answering to an OpenAI-style chat-completions API
///
/// The referenced document's text is extracted and embedded in the user
/// prompt together with the question, both verbatim. Upstream failures of
/// any kind surface to the client with the upstream message intact.
pub struct LlmAnswerer {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

// Chat-completions request/response structures
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmAnswerer {
    pub fn new(base_url: &str, api_key: String, model: String, max_tokens: u32) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LLM_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create HTTP client for answer API: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
        })
    }

    /// Build the user prompt: full document text plus the question, verbatim
    ///
    /// Oversized documents are passed through untruncated; token budgeting is
    /// left to the upstream API.
    fn build_prompt(document_text: &str, question: &str) -> String {
        format!("Document text:\n{}\n\nQuestion: {}", document_text, question)
    }

    /// One round trip to the chat-completions endpoint
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: LLM_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Answer API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "Answer API request failed: {} - {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse answer API response: {}", e)))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("Answer API returned no choices".to_string()))?;

        Ok(answer.trim().to_string())
    }
}

#[async_trait]
impl AnswerEngine for LlmAnswerer {
    fn name(&self) -> &str {
        "llm"
    }

    fn needs_document(&self) -> bool {
        true
    }

    async fn answer(
        &self,
        question: &str,
        _filename: Option<&str>,
        document: Option<&[u8]>,
    ) -> Result<String> {
        let bytes = document.ok_or_else(|| {
            AppError::Internal("Delegated engine called without document bytes".to_string())
        })?;

        let text = extract_document_text(bytes.to_vec()).await?;
        let prompt = Self::build_prompt(&text, question);

        self.complete(&prompt).await
    }
}

/// Extract plain text from PDF bytes on a blocking thread
///
/// Extraction failures degrade to empty text with a warning rather than
/// failing the request; uploads were already validated to carry the `%PDF`
/// signature, so hard failures here are rare.
pub async fn extract_document_text(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || match pdf_extract::extract_text_from_mem(&bytes) {
        Ok(text) => {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() {
                tracing::warn!("PDF text extraction returned empty");
            } else {
                tracing::debug!(text_len = trimmed.len(), "PDF text extracted");
            }
            Ok(trimmed)
        }
        Err(e) => {
            tracing::warn!(error = %e, "PDF text extraction failed");
            Ok(String::new())
        }
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_embeds_text_and_question_verbatim() {
        let prompt = LlmAnswerer::build_prompt("abc", "What does abc mean?");

        assert!(prompt.contains("abc"));
        assert!(prompt.contains("What does abc mean?"));
        assert!(prompt.starts_with("Document text:"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let engine = LlmAnswerer::new(
            "http://localhost:9999/v1/",
            "key".to_string(),
            "model".to_string(),
            64,
        )
        .unwrap();

        assert_eq!(engine.base_url, "http://localhost:9999/v1");
    }
}

use async_trait::async_trait;

use super::AnswerEngine;
use crate::error::Result;
use crate::routes::validation::ist_timestamp;

/// Fabricates a templated answer locally, without reading any document
///
/// The response embeds the question, the referenced filename (with a
/// placeholder when absent or empty) and the current IST time, so clients
/// can exercise the full ask flow with no upstream dependency.
pub struct SimulatedAnswerer;

#[async_trait]
impl AnswerEngine for SimulatedAnswerer {
    fn name(&self) -> &str {
        "simulated"
    }

    fn needs_document(&self) -> bool {
        false
    }

    async fn answer(
        &self,
        question: &str,
        filename: Option<&str>,
        _document: Option<&[u8]>,
    ) -> Result<String> {
        let source = filename.filter(|f| !f.is_empty()).unwrap_or("no document");

        Ok(format!(
            "Simulated answer to '{}' based on {} at {} IST.",
            question,
            source,
            ist_timestamp()
        ))
    }
}

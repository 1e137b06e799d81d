//! LLM-backed keyphrase extraction via `LlmClient`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AnalysisError;
use crate::keyphrase::prompts::{keyphrase_system, KEYPHRASE_PROMPT_TEMPLATE};
use crate::keyphrase::{Keyphrase, KeyphraseExtractor};
use crate::llm_client::LlmClient;

#[derive(Debug, Deserialize)]
struct KeyphraseResponse {
    keyphrases: Vec<Keyphrase>,
}

/// Asks the LLM for a ranked keyphrase list. One request per text, nothing cached.
pub struct LlmKeyphraseExtractor {
    llm: LlmClient,
    limit: usize,
}

impl LlmKeyphraseExtractor {
    pub fn new(llm: LlmClient, limit: usize) -> Self {
        Self { llm, limit }
    }
}

#[async_trait]
impl KeyphraseExtractor for LlmKeyphraseExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Keyphrase>, AnalysisError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = KEYPHRASE_PROMPT_TEMPLATE
            .replace("{limit}", &self.limit.to_string())
            .replace("{text}", text);
        let response: KeyphraseResponse = self
            .llm
            .call_json(&prompt, &keyphrase_system())
            .await
            .map_err(|e| AnalysisError::Extraction(format!("LLM keyphrase extraction failed: {e}")))?;

        let keyphrases = normalize_keyphrases(response.keyphrases, self.limit);
        debug!(count = keyphrases.len(), "LLM keyphrases extracted");
        Ok(keyphrases)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Lowercases and trims phrases, drops blanks and repeats (first wins), clamps
/// negative or non-finite scores to 0 and keeps at most `limit` entries.
fn normalize_keyphrases(raw: Vec<Keyphrase>, limit: usize) -> Vec<Keyphrase> {
    let mut out: Vec<Keyphrase> = Vec::new();
    for kp in raw {
        if out.len() == limit {
            break;
        }
        let phrase = kp.phrase.trim().to_lowercase();
        if phrase.is_empty() || out.iter().any(|k| k.phrase == phrase) {
            continue;
        }
        let score = if kp.score.is_finite() { kp.score.max(0.0) } else { 0.0 };
        out.push(Keyphrase::new(phrase, score));
    }
    out
}

//! Keyphrase extraction. A pluggable, trait-based backend that turns free text
//! into a ranked list of (phrase, relevance score) pairs.
//!
//! Default: `RakeExtractor` (pure-Rust, deterministic, no network).
//! Alternative: `LlmKeyphraseExtractor` (Claude, selected via `KEYPHRASE_BACKEND=llm`).
//!
//! `Analyzer` holds an `Arc<dyn KeyphraseExtractor>`, chosen at startup.

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

pub mod llm;
pub mod prompts;
pub mod rake;

pub use llm::LlmKeyphraseExtractor;
pub use rake::RakeExtractor;

/// A phrase and how characteristic it is of its source text (higher = more).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyphrase {
    pub phrase: String,
    pub score: f64,
}

impl Keyphrase {
    pub fn new(phrase: impl Into<String>, score: f64) -> Self {
        Self {
            phrase: phrase.into(),
            score,
        }
    }
}

/// The extractor trait. Implementations must be stateless across calls: a
/// result computed for one text must never be reused for another.
#[async_trait]
pub trait KeyphraseExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<Keyphrase>, AnalysisError>;

    /// Backend label, for logs.
    fn backend(&self) -> &'static str;
}

/// Tuning shared by every backend. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorSettings {
    /// Maximum number of keyphrases returned per text.
    pub limit: usize,
    /// Tokens with fewer characters are treated as phrase delimiters.
    pub min_token_len: usize,
    /// Longest candidate phrase, in words.
    pub max_phrase_words: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            limit: 20,
            min_token_len: 3,
            max_phrase_words: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyphraseBackend {
    #[default]
    Rake,
    Llm,
}

impl FromStr for KeyphraseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rake" => Ok(KeyphraseBackend::Rake),
            "llm" => Ok(KeyphraseBackend::Llm),
            other => Err(format!("unknown keyphrase backend '{other}' (expected 'rake' or 'llm')")),
        }
    }
}

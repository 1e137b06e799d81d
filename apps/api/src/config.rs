use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::keyphrase::{ExtractorSettings, KeyphraseBackend};

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values or a missing API key for the LLM backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub keyphrase_backend: KeyphraseBackend,
    /// Only read when `keyphrase_backend` is `Llm`.
    pub anthropic_api_key: Option<String>,
    pub extractor: ExtractorSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ExtractorSettings::default();

        let keyphrase_backend: KeyphraseBackend =
            parse_or(&lookup, "KEYPHRASE_BACKEND", KeyphraseBackend::default())?;
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if keyphrase_backend == KeyphraseBackend::Llm && anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when KEYPHRASE_BACKEND=llm");
        }

        let extractor = ExtractorSettings {
            limit: parse_or(&lookup, "KEYPHRASE_LIMIT", defaults.limit)?,
            min_token_len: parse_or(&lookup, "KEYPHRASE_MIN_TOKEN_LEN", defaults.min_token_len)?,
            max_phrase_words: parse_or(
                &lookup,
                "KEYPHRASE_MAX_PHRASE_WORDS",
                defaults.max_phrase_words,
            )?,
        };
        if extractor.limit == 0 {
            bail!("KEYPHRASE_LIMIT must be at least 1");
        }
        if extractor.max_phrase_words == 0 {
            bail!("KEYPHRASE_MAX_PHRASE_WORDS must be at least 1");
        }

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            keyphrase_backend,
            anthropic_api_key,
            extractor,
        })
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value for '{key}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.keyphrase_backend, KeyphraseBackend::Rake);
        assert_eq!(config.extractor, ExtractorSettings::default());
    }

    #[test]
    fn test_llm_backend_requires_api_key() {
        assert!(load(&[("KEYPHRASE_BACKEND", "llm")]).is_err());
        assert!(load(&[("KEYPHRASE_BACKEND", "llm"), ("ANTHROPIC_API_KEY", " ")]).is_err());

        let config = load(&[("KEYPHRASE_BACKEND", "llm"), ("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.keyphrase_backend, KeyphraseBackend::Llm);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_extractor_overrides() {
        let config = load(&[("KEYPHRASE_LIMIT", "10"), ("KEYPHRASE_MIN_TOKEN_LEN", "2")]).unwrap();
        assert_eq!(config.extractor.limit, 10);
        assert_eq!(config.extractor.min_token_len, 2);
        assert_eq!(config.extractor.max_phrase_words, 3);
    }

    #[test]
    fn test_invalid_numbers_are_startup_errors() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("KEYPHRASE_LIMIT", "-1")]).is_err());
        assert!(load(&[("KEYPHRASE_LIMIT", "0")]).is_err());
        assert!(load(&[("KEYPHRASE_BACKEND", "yake")]).is_err());
    }
}

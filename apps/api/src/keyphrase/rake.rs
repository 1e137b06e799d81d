//! RAKE-style keyphrase extraction: candidate phrases are maximal runs of
//! content words, scored by word co-occurrence degree over frequency.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::errors::AnalysisError;
use crate::keyphrase::{ExtractorSettings, Keyphrase, KeyphraseExtractor};

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "during",
    "each", "etc", "every", "few", "for", "from", "further", "had", "has", "have", "having",
    "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "looking", "may", "me", "more", "most", "must", "my", "no", "nor", "not",
    "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
    "own", "per", "plus", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "us", "using", "very", "via", "was", "we", "well", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "within",
    "would", "you", "your", "yours",
];

/// Characters that end a candidate phrase.
fn is_phrase_break(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '|'
            | '/' | '\\' | '\n' | '\r' | '\t' | '•' | '·' | '–' | '—'
    )
}

/// Default extraction backend. Stateless and deterministic.
#[derive(Debug, Clone)]
pub struct RakeExtractor {
    settings: ExtractorSettings,
    stopwords: HashSet<&'static str>,
}

impl RakeExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self {
            settings,
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    /// Runs extraction synchronously. Results are sorted by score, highest
    /// first; equal scores keep first-appearance order.
    pub fn extract_sync(&self, text: &str) -> Vec<Keyphrase> {
        let candidates = self.candidate_phrases(text);
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &candidates {
            for word in phrase {
                *frequency.entry(word.as_str()).or_default() += 1.0;
                *degree.entry(word.as_str()).or_default() += phrase.len() as f64;
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut scored: Vec<Keyphrase> = Vec::new();
        for phrase in &candidates {
            let joined = phrase.join(" ");
            if !seen.insert(joined.clone()) {
                continue;
            }
            let score: f64 = phrase
                .iter()
                .map(|w| degree[w.as_str()] / frequency[w.as_str()])
                .sum();
            scored.push(Keyphrase::new(joined, score));
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.settings.limit);
        scored
    }

    fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let lower = text.to_lowercase();
        let mut phrases = Vec::new();

        for fragment in lower.split(is_phrase_break) {
            let mut current: Vec<String> = Vec::new();
            for raw in fragment.split_whitespace() {
                let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));
                if self.is_content_word(word) {
                    current.push(word.to_string());
                    if current.len() == self.settings.max_phrase_words {
                        phrases.push(std::mem::take(&mut current));
                    }
                } else if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            }
            if !current.is_empty() {
                phrases.push(current);
            }
        }
        phrases
    }

    fn is_content_word(&self, word: &str) -> bool {
        word.chars().count() >= self.settings.min_token_len
            && !self.stopwords.contains(word)
            && !word.chars().all(|c| c.is_ascii_digit())
    }
}

#[async_trait]
impl KeyphraseExtractor for RakeExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Keyphrase>, AnalysisError> {
        Ok(self.extract_sync(text))
    }

    fn backend(&self) -> &'static str {
        "rake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RakeExtractor {
        RakeExtractor::new(ExtractorSettings::default())
    }

    fn phrases(out: &[Keyphrase]) -> Vec<&str> {
        out.iter().map(|k| k.phrase.as_str()).collect()
    }

    #[test]
    fn test_stopwords_and_punctuation_split_phrases() {
        let out = extractor().extract_sync(
            "Seeking engineer experienced with distributed systems and queues",
        );
        let found = phrases(&out);
        assert!(found.contains(&"distributed systems"));
        assert!(found.contains(&"queues"));
        assert!(found.contains(&"seeking engineer experienced"));
    }

    #[test]
    fn test_longer_phrases_score_higher() {
        let out = extractor().extract_sync("Distributed systems, queues");
        assert_eq!(phrases(&out), vec!["distributed systems", "queues"]);
        assert!((out[0].score - 4.0).abs() < 1e-9);
        assert!((out[1].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_and_numeric_tokens_are_dropped() {
        let out = extractor().extract_sync("Go 2019 Kubernetes");
        assert_eq!(phrases(&out), vec!["kubernetes"]);
    }

    #[test]
    fn test_phrases_capped_at_max_words() {
        let settings = ExtractorSettings {
            max_phrase_words: 2,
            ..ExtractorSettings::default()
        };
        let out = RakeExtractor::new(settings).extract_sync("rust kafka postgres redis");
        assert_eq!(phrases(&out), vec!["rust kafka", "postgres redis"]);
    }

    #[test]
    fn test_duplicates_removed_and_limit_applied() {
        let settings = ExtractorSettings {
            limit: 2,
            ..ExtractorSettings::default()
        };
        let out = RakeExtractor::new(settings).extract_sync("rust. rust. kafka. postgres.");
        assert_eq!(out.len(), 2);
        assert_eq!(phrases(&out), vec!["rust", "kafka"]);
    }

    #[test]
    fn test_keeps_language_symbols() {
        let out = extractor().extract_sync("Experienced in C++ and C#");
        let found = phrases(&out);
        assert!(found.contains(&"c++"));
        // "c#" is below the minimum token length
        assert!(!found.iter().any(|p| p.contains("c#")));
        let out = extractor().extract_sync("Shipped F#/Kotlin services");
        assert!(phrases(&out).contains(&"kotlin services"));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extractor().extract_sync("   \n ").is_empty());
        assert!(extractor().extract_sync("and the of").is_empty());
    }

    #[tokio::test]
    async fn test_trait_extract_is_deterministic() {
        let ex = extractor();
        let text = "Built distributed systems using queues";
        let first = ex.extract(text).await.unwrap();
        let second = ex.extract(text).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(ex.backend(), "rake");
    }
}

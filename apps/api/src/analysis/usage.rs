//! Word-usage deficits: how many more times a resume should use each keyword,
//! scaled for the length difference between the two documents.

use crate::analysis::keywords::{KeywordMap, KeywordScores};
use crate::analysis::weighting::count_occurrences;

/// Number of `\w+` runs in `text`.
pub fn word_count(text: &str) -> usize {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .count()
}

/// For each keyword, `round(job_occurrences - resume_occurrences * ratio)` where
/// `ratio = words(job) / words(resume)`. Only positive deficits are kept, in
/// `keyword_values` order. An empty resume makes the ratio 0.
pub fn to_count(
    keyword_values: &KeywordScores,
    resume_text: &str,
    job_text: &str,
) -> KeywordMap<i64> {
    let resume_words = word_count(resume_text);
    let ratio = if resume_words > 0 {
        word_count(job_text) as f64 / resume_words as f64
    } else {
        0.0
    };

    let resume_lower = resume_text.to_lowercase();
    let job_lower = job_text.to_lowercase();

    let mut deficits = KeywordMap::new();
    for keyword in keyword_values.keys() {
        let needle = keyword.to_lowercase();
        let resume_occurrences = count_occurrences(&resume_lower, &needle) as f64 * ratio;
        let job_occurrences = count_occurrences(&job_lower, &needle) as f64;
        let deficit = (job_occurrences - resume_occurrences).round_ties_even() as i64;
        if deficit > 0 {
            deficits.insert(keyword, deficit);
        }
    }
    deficits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> KeywordScores {
        list.iter().map(|k| (k.to_string(), 1.0)).collect()
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Built distributed-systems, in 2021!"), 5);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_deficit_scaled_by_length_ratio() {
        // job: 8 words, resume: 4 words → ratio 2
        let job = "kafka kafka kafka kafka rust rust go go";
        let resume = "kafka rust java java";
        let counts = to_count(&keys(&["kafka", "rust"]), resume, job);
        // kafka: 4 - 1*2 = 2, rust: 2 - 1*2 = 0 (dropped)
        assert_eq!(counts.get("kafka"), Some(&2));
        assert!(!counts.contains("rust"));
    }

    #[test]
    fn test_never_negative() {
        let job = "rust";
        let resume = "rust rust rust rust";
        let counts = to_count(&keys(&["rust", "go"]), resume, job);
        assert!(counts.is_empty());
        assert!(counts.iter().all(|(_, v)| *v > 0));
    }

    #[test]
    fn test_rounds_half_to_even() {
        // job: 3 words, resume: 2 words → ratio 1.5; rust: 2 - 1 * 1.5 = 0.5 → 0
        let counts = to_count(&keys(&["rust"]), "rust java", "rust rust go");
        assert!(counts.is_empty());
        // go: 3 - 1 * 1.5 = 1.5 → 2
        let counts = to_count(&keys(&["go"]), "go java", "go go go");
        assert_eq!(counts.get("go"), Some(&2));
    }

    #[test]
    fn test_empty_resume() {
        let counts = to_count(&keys(&["rust"]), "", "rust and rust");
        assert_eq!(counts.get("rust"), Some(&2));
    }

    #[test]
    fn test_deterministic() {
        let words = keys(&["kafka", "rust", "go"]);
        let job = "kafka rust go kafka rust go kafka";
        let resume = "rust";
        assert_eq!(to_count(&words, resume, job), to_count(&words, resume, job));
    }
}

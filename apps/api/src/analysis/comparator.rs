//! Keyword comparison between a resume and a job description.
//!
//! Both texts go through the keyphrase extractor once; the resulting ranked
//! lists are matched term-for-term and summarised in an immutable
//! [`ComparisonResult`].

use serde::Serialize;
use tracing::debug;

use crate::analysis::keywords::KeywordScores;
use crate::errors::AnalysisError;
use crate::keyphrase::{Keyphrase, KeyphraseExtractor};

/// Everything derived from one resume/job keyphrase comparison.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    /// Matched term → resume score + job score.
    pub matches: KeywordScores,
    /// Sum of all matched combined scores.
    pub match_points: f64,
    /// Normalisation denominator for `match_points`.
    pub max_points: f64,
    /// Job terms never matched, with their job-side score.
    pub missed_keywords: KeywordScores,
    /// Matched terms with their job-side score.
    pub job_matches: KeywordScores,
    /// Matched terms with their resume-side score.
    pub resume_matches: KeywordScores,
    /// Matched terms scored lower on the resume side, keyed to (job − resume).
    pub low_keywords: KeywordScores,
}

impl ComparisonResult {
    /// `match_points / max_points`, or 0 when there is nothing to normalise by.
    pub fn match_percentage(&self) -> f64 {
        if self.max_points > 0.0 {
            self.match_points / self.max_points
        } else {
            0.0
        }
    }
}

/// Extracts keyphrases from both texts (resume first) and compares them.
pub async fn compare(
    extractor: &dyn KeyphraseExtractor,
    resume_text: &str,
    job_text: &str,
) -> Result<ComparisonResult, AnalysisError> {
    let resume_keyphrases = extractor.extract(resume_text).await?;
    let job_keyphrases = extractor.extract(job_text).await?;
    debug!(
        resume = resume_keyphrases.len(),
        job = job_keyphrases.len(),
        "keyphrases extracted"
    );
    Ok(compare_keyphrases(&resume_keyphrases, &job_keyphrases))
}

/// Pure comparison of two keyphrase lists.
///
/// Each job term can be consumed by at most one resume term; when a term repeats,
/// the earliest unconsumed position wins. Every matched resume score is also
/// added to `max_points`, which is halved at the end.
pub fn compare_keyphrases(resume: &[Keyphrase], job: &[Keyphrase]) -> ComparisonResult {
    let mut max_points: f64 = job.iter().map(|k| k.score).sum();
    let mut job_terms: Vec<Option<&str>> = job.iter().map(|k| Some(k.phrase.as_str())).collect();

    let mut matches = KeywordScores::new();
    let mut match_points = 0.0;

    for candidate in resume {
        let Some(pos) = job_terms
            .iter()
            .position(|t| *t == Some(candidate.phrase.as_str()))
        else {
            continue;
        };
        job_terms[pos] = None;

        let combined = candidate.score + job[pos].score;
        matches.insert(candidate.phrase.clone(), combined);
        match_points += combined;
        max_points += candidate.score;
    }
    max_points /= 2.0;

    let mut missed_keywords = KeywordScores::new();
    let mut job_matches = KeywordScores::new();
    for k in job {
        if matches.contains(&k.phrase) {
            job_matches.insert_if_absent(&k.phrase, k.score);
        } else {
            missed_keywords.insert_if_absent(&k.phrase, k.score);
        }
    }

    let mut resume_matches = KeywordScores::new();
    for k in resume.iter().filter(|k| matches.contains(&k.phrase)) {
        resume_matches.insert_if_absent(&k.phrase, k.score);
    }

    let mut low_keywords = KeywordScores::new();
    for (term, job_score) in job_matches.iter() {
        let resume_score = resume_matches.get(term).copied().unwrap_or(0.0);
        if *job_score > resume_score {
            low_keywords.insert(term, job_score - resume_score);
        }
    }

    ComparisonResult {
        matches,
        match_points,
        max_points,
        missed_keywords,
        job_matches,
        resume_matches,
        low_keywords,
    }
}

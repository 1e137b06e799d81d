//! End-to-end analysis: segment → compare → weight → score → report.
//!
//! A single forward pass with no branching back. Everything except the
//! keyphrase extractor call is pure computation over the two inputs.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::catalog::{SectionConfig, HEADER_SECTION};
use crate::analysis::comparator::compare;
use crate::analysis::completeness::{parsing_results, ParsingResult};
use crate::analysis::contact::{ContactInfo, ContactRegistry, UrlList};
use crate::analysis::keywords::KeywordMap;
use crate::analysis::segmenter::{Segmentation, Segmenter};
use crate::analysis::usage::to_count;
use crate::analysis::weighting::apply_weights;
use crate::errors::AnalysisError;
use crate::keyphrase::KeyphraseExtractor;

/// At or above this percentage, deficits are computed from matched terms;
/// below it, from missed terms.
pub const MISSED_THRESHOLD: f64 = 0.7;
/// Longest `underused` list returned.
pub const MAX_UNDERUSED: usize = 20;

/// Immutable catalogs the analysis runs against.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub sections: SectionConfig,
    pub contacts: ContactRegistry,
}

impl AnalysisConfig {
    pub fn builtin() -> Result<Self, AnalysisError> {
        Ok(Self {
            sections: SectionConfig::builtin()?,
            contacts: ContactRegistry::builtin()?,
        })
    }
}

/// Final output of one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// 0.0 – 1.0; exactly 0 on degenerate input.
    pub match_percentage: f64,
    /// Keyword → how many more times the resume should use it, largest first.
    pub underused: KeywordMap<i64>,
    pub contact_info: ContactInfo,
    pub urls: UrlList,
    pub parsing_results: ParsingResult,
}

/// `matched / missed` when more weight was missed than matched, otherwise
/// `matched / (matched + missed)`; 0 when both are 0.
pub fn final_percentage(matched_total: f64, missed_total: f64) -> f64 {
    if missed_total > matched_total {
        matched_total / missed_total
    } else if matched_total + missed_total > 0.0 {
        matched_total / (matched_total + missed_total)
    } else {
        0.0
    }
}

/// Whether deficits are computed from matched terms rather than missed ones.
fn uses_matched_terms(match_percentage: f64) -> bool {
    match_percentage >= MISSED_THRESHOLD
}

/// Runs analyses against a fixed configuration and extractor backend.
/// Cheap to clone; holds no per-analysis state.
#[derive(Clone)]
pub struct Analyzer {
    config: Arc<AnalysisConfig>,
    extractor: Arc<dyn KeyphraseExtractor>,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig, extractor: Arc<dyn KeyphraseExtractor>) -> Self {
        Self {
            config: Arc::new(config),
            extractor,
        }
    }

    pub fn extractor_backend(&self) -> &'static str {
        self.extractor.backend()
    }

    fn segmenter(&self) -> Segmenter<'_> {
        Segmenter::new(&self.config.sections, &self.config.contacts)
    }

    /// Segments resume lines with contact/URL extraction enabled.
    pub fn segment_resume<S: AsRef<str>>(&self, lines: &[S]) -> Segmentation {
        self.segmenter().segment(lines, true)
    }

    /// Structural completeness of an already segmented resume.
    pub fn parsing_results(&self, segmentation: &Segmentation) -> ParsingResult {
        parsing_results(&segmentation.sections, &self.config.sections)
    }

    /// Scores `candidate_lines` (resume paragraphs in document order, blank
    /// strings kept as separators) against `target_text` (job description).
    ///
    /// Either returns a complete report or fails; extractor failures are
    /// passed through unchanged.
    pub async fn analyze<S: AsRef<str>>(
        &self,
        candidate_lines: &[S],
        target_text: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        // segment
        let resume = self.segment_resume(candidate_lines);
        let target_lines: Vec<&str> = target_text.lines().collect();
        let job = self.segmenter().segment(&target_lines, false);
        let parsing = self.parsing_results(&resume);

        // compare
        let resume_text = resume.sections.joined_text(Some(HEADER_SECTION));
        let job_text = job.sections.joined_text(None);
        let comparison = compare(self.extractor.as_ref(), &resume_text, &job_text).await?;
        debug!(
            matches = comparison.matches.len(),
            missed = comparison.missed_keywords.len(),
            low = ?comparison.low_keywords,
            raw_percentage = comparison.match_percentage(),
            "keyphrases compared"
        );

        // weight
        let weights = &self.config.sections.weights;
        let matched_weighted = apply_weights(&job.sections, weights, &comparison.matches)?;
        let missed_weighted = apply_weights(&job.sections, weights, &comparison.missed_keywords)?;

        // score
        let matched_total = matched_weighted.total();
        let missed_total = missed_weighted.total();
        let match_percentage = final_percentage(matched_total, missed_total);

        let deficit_source = if uses_matched_terms(match_percentage) {
            &matched_weighted
        } else {
            &missed_weighted
        };
        let mut underused = to_count(deficit_source, &resume_text, &job_text);
        underused.sort_by_value_desc();
        underused.truncate(MAX_UNDERUSED);

        info!(
            backend = self.extractor.backend(),
            match_percentage,
            matched_total,
            missed_total,
            sections = resume.sections.len(),
            underused = underused.len(),
            "analysis complete"
        );

        // report
        Ok(AnalysisReport {
            match_percentage,
            underused,
            contact_info: resume.extracted.contact_info,
            urls: resume.extracted.urls,
            parsing_results: parsing,
        })
    }
}

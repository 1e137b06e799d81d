use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SectionConfig;
use crate::analysis::segmenter::ParsedSections;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub name: String,
    pub weight: f64,
    /// Heading keywords that open this section.
    pub identifiers: Vec<String>,
}

/// Structural completeness of a segmented resume, independent of keyword content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingResult {
    pub max_score: f64,
    pub parsing_score: f64,
    pub missed_sections: Vec<SectionSummary>,
    pub found_sections: Vec<SectionSummary>,
}

/// Sums catalog section weights into `max_score`, and the weights of sections
/// that have content in `parsed` into `parsing_score`.
pub fn parsing_results(parsed: &ParsedSections, config: &SectionConfig) -> ParsingResult {
    let mut max_score = 0.0;
    let mut parsing_score = 0.0;
    let mut found_sections = Vec::new();
    let mut missed_sections = Vec::new();

    for group in config.catalog.groups() {
        let name = group.canonical();
        // SectionConfig guarantees every catalog section has a weight.
        let weight = config.weights.weight(name).unwrap_or_default();
        max_score += weight;

        let summary = SectionSummary {
            name: name.to_string(),
            weight,
            identifiers: group.synonyms().to_vec(),
        };

        if parsed.has_content(name) {
            parsing_score += weight;
            found_sections.push(summary);
        } else {
            missed_sections.push(summary);
        }
    }

    ParsingResult {
        max_score,
        parsing_score,
        missed_sections,
        found_sections,
    }
}

//! Section weighting. Boosts a keyword's value by how concentrated its
//! occurrences are in heavily weighted sections.

use std::collections::HashMap;

use tracing::debug;

use crate::analysis::catalog::SectionWeightTable;
use crate::analysis::keywords::KeywordScores;
use crate::analysis::segmenter::ParsedSections;
use crate::errors::AnalysisError;

/// Non-overlapping occurrences of `needle` in `haystack`. An empty needle occurs 0 times.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Redistributes `keyword_values` across `sections`.
///
/// For every non-empty section and every keyword present in it,
/// `weight * value * (section_count / global_count)` is added to the keyword's
/// value; the result is divided by the summed weight of all sections that
/// contained at least one keyword. Counting is case-insensitive.
///
/// If no section contains any keyword the input is degenerate and every value is 0.
/// A section without a weight-table entry is a configuration error.
pub fn apply_weights(
    sections: &ParsedSections,
    weights: &SectionWeightTable,
    keyword_values: &KeywordScores,
) -> Result<KeywordScores, AnalysisError> {
    for section in sections.iter() {
        weights.require(&section.name)?;
    }
    if keyword_values.is_empty() {
        return Ok(KeywordScores::new());
    }

    let global_text = sections.joined_text(None).to_lowercase();
    let needles: Vec<(&str, String, f64)> = keyword_values
        .iter()
        .map(|(k, v)| (k, k.to_lowercase(), *v))
        .collect();

    let mut weighted = keyword_values.clone();
    let mut global_counts: HashMap<&str, usize> = HashMap::new();
    let mut total_weight_applied = 0.0;

    for section in sections.iter().filter(|s| !s.lines.is_empty()) {
        let weight = weights.require(&section.name)?;
        let text = section.lines.join("\n").to_lowercase();
        let mut applied = false;

        for (keyword, needle, value) in &needles {
            let section_count = count_occurrences(&text, needle);
            if section_count == 0 {
                continue;
            }
            let global_count = *global_counts
                .entry(*keyword)
                .or_insert_with(|| count_occurrences(&global_text, needle));
            let share = section_count as f64 / global_count as f64;
            weighted.add(keyword, weight * value * share);
            applied = true;
        }

        if applied {
            total_weight_applied += weight;
        }
    }

    if total_weight_applied == 0.0 {
        debug!(
            keywords = keyword_values.len(),
            "no section contains any keyword, weighting is degenerate"
        );
        weighted.values_mut().for_each(|v| *v = 0.0);
        return Ok(weighted);
    }

    weighted
        .values_mut()
        .for_each(|v| *v /= total_weight_applied);
    Ok(weighted)
}

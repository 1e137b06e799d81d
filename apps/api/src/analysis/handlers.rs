//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::completeness::ParsingResult;
use crate::analysis::contact::{ContactInfo, UrlList};
use crate::analysis::orchestrator::AnalysisReport;
use crate::analysis::segmenter::ParsedSections;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Resume paragraphs, either pre-split or as one text split on newlines.
/// Blank entries are kept: they are the section boundaries.
#[derive(Debug, Default, Deserialize)]
pub struct ResumeInput {
    #[serde(default)]
    pub resume_lines: Vec<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
}

impl ResumeInput {
    pub fn into_lines(self) -> Result<Vec<String>, AppError> {
        let lines = match (self.resume_lines.is_empty(), self.resume_text) {
            (false, Some(_)) => {
                return Err(AppError::Validation(
                    "provide either resume_lines or resume_text, not both".to_string(),
                ))
            }
            (false, None) => self.resume_lines,
            (true, Some(text)) => text.lines().map(str::to_string).collect(),
            (true, None) => Vec::new(),
        };

        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }
        Ok(lines)
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub resume: ResumeInput,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct SectionsRequest {
    #[serde(flatten)]
    pub resume: ResumeInput,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub sections: ParsedSections,
    pub contact_info: ContactInfo,
    pub urls: UrlList,
    pub parsing_results: ParsingResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Full analysis: segment → compare keyphrases → weight → score.
/// Extractor failures surface as 502; nothing partial is returned.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    let lines = request.resume.into_lines()?;

    let report = state
        .analyzer
        .analyze(&lines, &request.job_description)
        .await?;

    Ok(Json(report))
}

/// POST /api/v1/sections
///
/// Segmentation preview. Never calls the keyphrase extractor.
pub async fn handle_sections(
    State(state): State<AppState>,
    Json(request): Json<SectionsRequest>,
) -> Result<Json<SectionsResponse>, AppError> {
    let lines = request.resume.into_lines()?;

    let segmentation = state.analyzer.segment_resume(&lines);
    let parsing_results = state.analyzer.parsing_results(&segmentation);

    Ok(Json(SectionsResponse {
        sections: segmentation.sections,
        contact_info: segmentation.extracted.contact_info,
        urls: segmentation.extracted.urls,
        parsing_results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_text_is_split_on_newlines() {
        let input = ResumeInput {
            resume_text: Some("Jane Doe\n\nSkills\nRust".to_string()),
            ..Default::default()
        };
        assert_eq!(
            input.into_lines().unwrap(),
            vec!["Jane Doe", "", "Skills", "Rust"]
        );
    }

    #[test]
    fn test_blank_resume_is_rejected() {
        let input = ResumeInput {
            resume_lines: vec!["".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(matches!(input.into_lines(), Err(AppError::Validation(_))));
        assert!(ResumeInput::default().into_lines().is_err());
    }

    #[test]
    fn test_both_inputs_are_rejected() {
        let input = ResumeInput {
            resume_lines: vec!["Jane".to_string()],
            resume_text: Some("Jane".to_string()),
        };
        assert!(matches!(input.into_lines(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_analyze_request_deserializes_flattened_input() {
        let json = r#"{"resume_lines": ["Jane", "", "Skills", "Rust"], "job_description": "Rust"}"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.resume.resume_lines.len(), 4);
        assert_eq!(request.job_description, "Rust");
    }
}

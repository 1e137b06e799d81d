pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/sections", post(handlers::handle_sections))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::orchestrator::{AnalysisConfig, Analyzer};
    use crate::config::Config;
    use crate::keyphrase::RakeExtractor;

    fn test_state() -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        let extractor = Arc::new(RakeExtractor::new(config.extractor));
        AppState {
            analyzer: Analyzer::new(AnalysisConfig::builtin().unwrap(), extractor),
            config,
        }
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["keyphrase_backend"], "rake");
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let (status, body) = post_json(
            "/api/v1/analyze",
            json!({
                "resume_lines": [
                    "John Doe",
                    "john@example.com",
                    "",
                    "Experience",
                    "Built distributed systems using queues",
                    ""
                ],
                "job_description": "Acme Corp\n\nRequirements\nDistributed systems and queues"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contact_info"]["email"], "john@example.com");
        let pct = body["match_percentage"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&pct));
        assert!(body["underused"].is_object());
        assert_eq!(body["parsing_results"]["max_score"], 11.0);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_job_description() {
        let (status, body) = post_json(
            "/api/v1/analyze",
            json!({"resume_text": "Jane Doe\n\nSkills\nRust", "job_description": "  "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_missing_resume() {
        let (status, _) = post_json("/api/v1/analyze", json!({"job_description": "Rust"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sections_preview() {
        let (status, body) = post_json(
            "/api/v1/sections",
            json!({
                "resume_text": "Jane Doe\njane@example.com\ngithub.com/jane\n\nSkills\nRust, Kafka"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"]["header"], json!(["Jane Doe"]));
        assert_eq!(body["sections"]["qualification"], json!(["Rust, Kafka"]));
        assert_eq!(body["contact_info"]["email"], "jane@example.com");
        assert_eq!(body["contact_info"]["github"], "github.com/jane");
        assert_eq!(body["parsing_results"]["parsing_score"], 4.0);
    }
}

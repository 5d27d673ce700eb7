pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::diff::handlers::handle_diff;
use crate::errors::AppError;
use crate::matching::handlers::{handle_keywords, handle_match};
use crate::skills::handlers::{handle_extract_skills, handle_skill_gaps};
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/extract", post(handle_extract_skills))
        .route("/api/v1/skills/gaps", post(handle_skill_gaps))
        // Matching API
        .route("/api/v1/match", post(handle_match))
        .route("/api/v1/keywords", post(handle_keywords))
        // Diff API
        .route("/api/v1/diff", post(handle_diff))
        // Analysis API
        .route("/api/v1/analyze", post(handle_analyze))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::FailingEmbedder;
    use crate::state::testing::{test_state, test_state_with};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const RESUME: &str = "Experienced Python developer with AWS and Docker skills";
    const JOB: &str = "Looking for a Python engineer skilled in Kubernetes and AWS";

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        send(build_router(test_state()), Method::POST, uri, Some(body)).await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(build_router(test_state()), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-match-api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(build_router(test_state()), Method::GET, "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_extract_skills() {
        let (status, body) = post_json("/api/v1/skills/extract", json!({ "text": RESUME })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["aws", "docker", "python"]));
        assert_eq!(body["strategy"], "dictionary");
    }

    #[tokio::test]
    async fn test_skill_gaps() {
        let (status, body) = post_json(
            "/api/v1/skills/gaps",
            json!({ "resume_text": RESUME, "job_text": JOB }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing_skills"], json!(["kubernetes"]));
        assert_eq!(body["matched_skills"], json!(["aws", "python"]));
        assert_eq!(body["fully_covered"], false);
    }

    #[tokio::test]
    async fn test_skill_gaps_rejects_empty_job() {
        let (status, body) = post_json(
            "/api/v1/skills/gaps",
            json!({ "resume_text": RESUME, "job_text": "  " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_match_lexical_accepts_legacy_label() {
        let (status, body) = post_json(
            "/api/v1/match",
            json!({ "resume_text": RESUME, "job_texts": [JOB, "baking bread"], "method": "tfidf" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "lexical");
        let scores = body["scores"].as_array().unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0]["job_index"], 0);
        assert!(scores[0]["score"].as_f64().unwrap() > 0.0);
        assert_eq!(scores[1]["score"].as_f64().unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_match_semantic() {
        let (status, body) = post_json(
            "/api/v1/match",
            json!({ "resume_text": RESUME, "job_texts": [JOB], "method": "semantic" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "semantic");
        let score = body["scores"][0]["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[tokio::test]
    async fn test_match_rejects_empty_jobs() {
        let (status, _) = post_json(
            "/api/v1/match",
            json!({ "resume_text": RESUME, "job_texts": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_rejects_too_many_jobs() {
        let jobs = vec![JOB; 6];
        let (status, body) = post_json(
            "/api/v1/match",
            json!({ "resume_text": RESUME, "job_texts": jobs }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_semantic_outage_is_bad_gateway() {
        let router = build_router(test_state_with(Arc::new(FailingEmbedder)));
        let (status, body) = send(
            router,
            Method::POST,
            "/api/v1/match",
            Some(json!({ "resume_text": RESUME, "job_texts": [JOB], "method": "bert" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "SCORING_ERROR");
    }

    #[tokio::test]
    async fn test_keywords() {
        let (status, body) = post_json(
            "/api/v1/keywords",
            json!({ "resume_text": RESUME, "job_texts": [JOB], "job_index": 0, "top_n": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let keywords = body["keywords"].as_array().unwrap();
        assert!(!keywords.is_empty() && keywords.len() <= 3);
        assert!(keywords.iter().all(|k| k["weight"].as_f64().unwrap() > 0.0));
    }

    #[tokio::test]
    async fn test_keywords_out_of_range_job_is_unprocessable() {
        let (status, body) = post_json(
            "/api/v1/keywords",
            json!({ "resume_text": RESUME, "job_texts": [JOB], "job_index": 4 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_diff() {
        let (status, body) = post_json(
            "/api/v1/diff",
            json!({ "original": "built APIs", "modified": "built scalable APIs" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["highlighted"], "built **scalable** APIs");
    }

    #[tokio::test]
    async fn test_diff_rejects_too_many_words() {
        let original = "a ".repeat(99_999);
        let modified = "b ".repeat(99_999);
        let (status, body) = post_json(
            "/api/v1/diff",
            json!({ "original": original, "modified": modified }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze() {
        let (status, body) = post_json(
            "/api/v1/analyze",
            json!({
                "resume_text": RESUME,
                "jobs": [
                    { "title": "Baker", "description": "baking bread" },
                    { "title": "Platform", "description": JOB }
                ],
                "include_tailoring": true
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "lexical");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["rank"], 1);
        assert_eq!(results[0]["title"], "Platform");
        assert_eq!(results[0]["missing_skills"], json!(["kubernetes"]));
        assert_eq!(results[0]["tailoring"]["missing_skills"], json!(["kubernetes"]));
        assert_eq!(results[1]["job_index"], 0);
    }
}

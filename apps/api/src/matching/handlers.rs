//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::keywords::{ensure_fitted_on, top_keywords};
use crate::matching::{corpus, validate_input, MatchMethod};
use crate::models::{KeywordScore, ScorePair};
use crate::state::AppState;
use crate::validation::{check_jobs, check_text};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_texts: Vec<String>,
    #[serde(default)]
    pub method: MatchMethod,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub method: MatchMethod,
    /// One entry per job, in request order.
    pub scores: Vec<ScorePair>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub resume_text: String,
    pub job_texts: Vec<String>,
    /// Zero-based index into `job_texts`.
    pub job_index: usize,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub job_index: usize,
    pub keywords: Vec<KeywordScore>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores the resume against every job with the requested method.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    check_text(&state.config, "resume_text", &request.resume_text)?;
    check_jobs(&state.config, &request.job_texts)?;

    let scores = state
        .matcher(request.method)
        .score(&request.resume_text, &request.job_texts)
        .await?;

    info!(
        method = request.method.as_str(),
        jobs = scores.len(),
        "Matched resume against jobs"
    );

    Ok(Json(MatchResponse {
        method: request.method,
        scores,
    }))
}

/// POST /api/v1/keywords
///
/// Terms that drive the lexical score between the resume and one job, fitted over
/// the same `[resume] + job_texts` set the lexical match uses.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    check_text(&state.config, "resume_text", &request.resume_text)?;
    check_jobs(&state.config, &request.job_texts)?;
    validate_input(&request.resume_text, &request.job_texts)?;

    let top_n = request.top_n.unwrap_or(state.config.default_top_n);
    let documents = corpus(&request.resume_text, &request.job_texts);
    let (space, feature_names) = state.lexical.vectorize(&documents);
    ensure_fitted_on(&space, &documents)?;

    // Document 0 is the resume; job `i` sits at `i + 1`.
    let job_document = request.job_index.saturating_add(1);
    let keywords = top_keywords(&space, &feature_names, 0, job_document, top_n)?;

    Ok(Json(KeywordsResponse {
        job_index: request.job_index,
        keywords,
    }))
}

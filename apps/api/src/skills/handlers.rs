//! Axum route handlers for the Skills API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::skills::{gaps, SkillSet, SkillStrategy};
use crate::state::AppState;
use crate::validation::check_text;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: SkillSet,
    pub strategy: SkillStrategy,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub missing_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub fully_covered: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Returns the normalized skill labels found in a text. No skills is not an error.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    check_text(&state.config, "text", &request.text)?;

    let skills = state.extractor.extract(&request.text);

    Ok(Json(ExtractSkillsResponse {
        skills,
        strategy: state.extractor.strategy(),
    }))
}

/// POST /api/v1/skills/gaps
///
/// Skills the job lists that the resume does not.
pub async fn handle_skill_gaps(
    State(state): State<AppState>,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }
    check_text(&state.config, "resume_text", &request.resume_text)?;
    check_text(&state.config, "job_text", &request.job_text)?;

    let resume_skills = state.extractor.extract(&request.resume_text);
    let job_skills = state.extractor.extract(&request.job_text);
    let result = gaps(&resume_skills, &job_skills);

    info!(
        missing = result.missing().len(),
        matched = result.matched().len(),
        "Computed skill gaps"
    );

    Ok(Json(SkillGapResponse {
        missing_skills: result.missing().to_sorted_vec(),
        matched_skills: result.matched().to_sorted_vec(),
        fully_covered: result.is_fully_covered(),
    }))
}

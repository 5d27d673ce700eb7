//! Axum route handler for the Analysis API.

use axum::{extract::State, Json};

use crate::analysis::{analyze, AnalyzeRequest, MatchReport};
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::{check_jobs, check_text};

/// POST /api/v1/analyze
///
/// Scores, ranks, and explains every job against the resume in one call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<MatchReport>, AppError> {
    check_text(&state.config, "resume_text", &request.resume_text)?;
    let descriptions: Vec<&str> = request.jobs.iter().map(|j| j.description.as_str()).collect();
    check_jobs(&state.config, &descriptions)?;

    let top_n = request.top_n.unwrap_or(state.config.default_top_n);
    let report = analyze(
        state.matcher(request.method),
        &state.lexical,
        state.extractor.as_ref(),
        &request,
        top_n,
    )
    .await?;

    Ok(Json(report))
}

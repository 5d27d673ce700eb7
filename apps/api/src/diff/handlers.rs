//! Axum route handler for the Diff API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::diff::{diff_words, highlight_with, DiffToken, HighlightStyle};
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::{check_text, check_word_count};

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub original: String,
    pub modified: String,
    /// Markers for inserted words; defaults to `**`.
    pub style: Option<HighlightStyle>,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub highlighted: String,
    pub tokens: Vec<DiffToken>,
}

/// POST /api/v1/diff
///
/// Marks the words `modified` adds over `original`. Alignment is quadratic in the
/// word count, so it runs on the blocking pool.
pub async fn handle_diff(
    State(state): State<AppState>,
    Json(request): Json<DiffRequest>,
) -> Result<Json<DiffResponse>, AppError> {
    check_text(&state.config, "original", &request.original)?;
    check_text(&state.config, "modified", &request.modified)?;
    check_word_count(&state.config, "original", &request.original)?;
    check_word_count(&state.config, "modified", &request.modified)?;

    let DiffRequest {
        original,
        modified,
        style,
    } = request;
    let style = style.unwrap_or_default();

    let response = tokio::task::spawn_blocking(move || DiffResponse {
        highlighted: highlight_with(&original, &modified, &style),
        tokens: diff_words(&original, &modified),
    })
    .await
    .map_err(anyhow::Error::from)?;

    Ok(Json(response))
}

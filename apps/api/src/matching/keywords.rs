//! Keyword ranking — explains a lexical score by the terms both sides weight.

use tracing::debug;

use crate::matching::tfidf::VectorSpace;
use crate::matching::MatchError;
use crate::models::KeywordScore;

/// Ranks terms that carry positive weight in both the resume and the job vector.
///
/// Weight is `resume_weight * job_weight`. Output is sorted descending by weight,
/// ties keep feature order, and at most `top_n` terms are returned.
///
/// Fails when either index is outside the space or when `feature_names` does not
/// describe the space's features.
pub fn top_keywords(
    space: &VectorSpace,
    feature_names: &[String],
    resume_index: usize,
    job_index: usize,
    top_n: usize,
) -> Result<Vec<KeywordScore>, MatchError> {
    if feature_names.len() != space.dimension() || feature_names != space.features() {
        return Err(MatchError::InvalidKeywordInput(format!(
            "{} feature names supplied for a space of dimension {}",
            feature_names.len(),
            space.dimension()
        )));
    }

    let resume = space.vector(resume_index).ok_or_else(|| {
        MatchError::InvalidKeywordInput(format!(
            "resume index {resume_index} out of range for {} documents",
            space.len()
        ))
    })?;
    let job = space.vector(job_index).ok_or_else(|| {
        MatchError::InvalidKeywordInput(format!(
            "job index {job_index} out of range for {} documents",
            space.len()
        ))
    })?;

    let mut ranked: Vec<KeywordScore> = feature_names
        .iter()
        .zip(resume.iter().zip(job))
        .filter(|(_, (r, j))| **r > 0.0 && **j > 0.0)
        .map(|(term, (&r, &j))| KeywordScore {
            term: term.clone(),
            weight: r * j,
        })
        .collect();

    // `sort_by` is stable, so equal weights stay in feature order.
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked.truncate(top_n);

    debug!(
        resume_index,
        job_index,
        returned = ranked.len(),
        "Ranked shared keywords"
    );

    Ok(ranked)
}

/// Guards a ranking call: `space` must have been fit on exactly `documents`.
pub fn ensure_fitted_on<S: AsRef<str>>(
    space: &VectorSpace,
    documents: &[S],
) -> Result<(), MatchError> {
    if space.is_fitted_on(documents) {
        Ok(())
    } else {
        Err(MatchError::InvalidKeywordInput(
            "vector space was fit on a different document set".to_string(),
        ))
    }
}

use std::sync::Arc;

use tracing::debug;

use crate::embedding::{validate_batch, Embedder};
use crate::matching::similarity::{cosine, unit_score};
use crate::matching::{corpus, validate_input, MatchError};
use crate::models::ScorePair;

/// Embedding-based matcher. Encodes `[resume] + jobs` in one batch and scores each job
/// by cosine against the resume embedding.
///
/// Raw cosine of dense embeddings lies in `[-1, 1]`; scores are clamped into `[0, 1]`
/// so lexical and semantic results share one convention.
#[derive(Clone)]
pub struct SemanticMatcher {
    embedder: Arc<dyn Embedder>,
}

impl SemanticMatcher {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn model_id(&self) -> &str {
        self.embedder.model_id()
    }

    /// Any embedding failure fails the whole request; nothing is partially scored.
    pub async fn score<S: AsRef<str>>(
        &self,
        resume_text: &str,
        job_texts: &[S],
    ) -> Result<Vec<ScorePair>, MatchError> {
        validate_input(resume_text, job_texts)?;

        let documents = corpus(resume_text, job_texts);
        let embeddings = self.embedder.embed_batch(&documents).await?;
        validate_batch(documents.len(), &embeddings)?;

        let resume = &embeddings[0];
        let scores: Vec<ScorePair> = embeddings[1..]
            .iter()
            .enumerate()
            .map(|(job_index, job)| ScorePair {
                job_index,
                score: unit_score(cosine(resume, job)),
            })
            .collect();

        debug!(
            model = self.model_id(),
            jobs = scores.len(),
            "Scored jobs semantically"
        );

        Ok(scores)
    }
}

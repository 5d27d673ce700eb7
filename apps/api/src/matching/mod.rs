//! Matching — scores one resume against a list of job descriptions.
//!
//! Two interchangeable strategies produce the same `Vec<ScorePair>` shape:
//! `LexicalMatcher` (joint TF-IDF) and `SemanticMatcher` (sentence embeddings).
//! Callers pick one per request through `MatchMethod` and never branch again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::models::ScorePair;

pub mod handlers;
pub mod keywords;
pub mod semantic;
pub mod similarity;
pub mod tfidf;

pub use semantic::SemanticMatcher;
pub use tfidf::{LexicalMatcher, StopWords};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("insufficient input: {0}")]
    InsufficientInput(String),

    #[error("invalid keyword-ranking input: {0}")]
    InvalidKeywordInput(String),

    #[error("scoring failed: {0}")]
    Scoring(#[from] EmbeddingError),
}

/// Per-request choice of matching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    #[default]
    #[serde(alias = "tfidf", alias = "tf-idf", alias = "TF-IDF")]
    Lexical,
    #[serde(alias = "bert", alias = "BERT")]
    Semantic,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Lexical => "lexical",
            MatchMethod::Semantic => "semantic",
        }
    }
}

/// A selected matching strategy, borrowed from the shared state for one request.
#[derive(Clone, Copy)]
pub enum Matcher<'a> {
    Lexical(&'a LexicalMatcher),
    Semantic(&'a SemanticMatcher),
}

impl Matcher<'_> {
    pub fn method(&self) -> MatchMethod {
        match self {
            Matcher::Lexical(_) => MatchMethod::Lexical,
            Matcher::Semantic(_) => MatchMethod::Semantic,
        }
    }

    /// The embedding model behind a semantic matcher.
    pub fn model_id(&self) -> Option<&str> {
        match self {
            Matcher::Lexical(_) => None,
            Matcher::Semantic(m) => Some(m.model_id()),
        }
    }

    /// Scores each job against the resume; output follows job order.
    pub async fn score<S: AsRef<str> + Sync>(
        &self,
        resume_text: &str,
        job_texts: &[S],
    ) -> Result<Vec<ScorePair>, MatchError> {
        match self {
            Matcher::Lexical(m) => m.score(resume_text, job_texts),
            Matcher::Semantic(m) => m.score(resume_text, job_texts).await,
        }
    }
}

/// Rejects requests that cannot produce meaningful scores.
pub fn validate_input<S: AsRef<str>>(resume_text: &str, job_texts: &[S]) -> Result<(), MatchError> {
    if resume_text.trim().is_empty() {
        return Err(MatchError::InsufficientInput(
            "resume text is empty".to_string(),
        ));
    }
    if job_texts.is_empty() {
        return Err(MatchError::InsufficientInput(
            "at least one job description is required".to_string(),
        ));
    }
    Ok(())
}

/// The ordered document set of one request: the resume first, then every job.
pub fn corpus<'a, S: AsRef<str>>(resume_text: &'a str, job_texts: &'a [S]) -> Vec<&'a str> {
    std::iter::once(resume_text)
        .chain(job_texts.iter().map(AsRef::as_ref))
        .collect()
}

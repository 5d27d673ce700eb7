use serde::{Deserialize, Serialize};

/// Where a document sits within one matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    Resume,
    /// Zero-based position in the caller's job list.
    Job(usize),
}

/// Plain text plus its role. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    role: DocumentRole,
    title: Option<String>,
    text: String,
}

impl Document {
    pub fn resume(text: impl Into<String>) -> Self {
        Self {
            role: DocumentRole::Resume,
            title: None,
            text: text.into(),
        }
    }

    pub fn job(index: usize, text: impl Into<String>) -> Self {
        Self {
            role: DocumentRole::Job(index),
            title: None,
            text: text.into(),
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn role(&self) -> DocumentRole {
        self.role
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Similarity of the resume against one job, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub job_index: usize,
    pub score: f32,
}

/// A term shared by a resume/job pair and its combined salience.
/// Only meaningful for the pair (and vector space) it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub term: String,
    pub weight: f32,
}

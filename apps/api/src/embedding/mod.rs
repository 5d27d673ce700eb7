//! Sentence embeddings — the `Embedder` capability and its HTTP-backed implementation.
//!
//! The semantic matcher only ever sees `Arc<dyn Embedder>`. One instance is built at
//! startup, stored in `AppState`, and shared read-only by every request.

use async_trait::async_trait;
use thiserror::Error;

pub mod client;

pub use client::EmbeddingClient;

/// Default model served by the embedding server.
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("embedding server unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("expected {expected} embeddings, received {received}")]
    BatchMismatch { expected: usize, received: usize },

    #[error("embedding {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid embedding client configuration: {0}")]
    InvalidConfig(String),
}

/// Encodes texts into fixed-length dense vectors.
///
/// Implementations must be a pure function of the input text for a fixed model:
/// the same text always yields the same vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encodes `texts` in one batch, returning one vector per input in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Identifier of the model behind this embedder.
    fn model_id(&self) -> &str;
}

/// Checks that a batch response lines up with its request: one vector per input,
/// all of the same non-zero dimension.
pub fn validate_batch(expected: usize, vectors: &[Vec<f32>]) -> Result<(), EmbeddingError> {
    if vectors.len() != expected {
        return Err(EmbeddingError::BatchMismatch {
            expected,
            received: vectors.len(),
        });
    }

    let Some(first) = vectors.first() else {
        return Ok(());
    };
    let dimension = first.len();

    for (index, vector) in vectors.iter().enumerate() {
        if vector.len() != dimension || dimension == 0 {
            return Err(EmbeddingError::DimensionMismatch {
                index,
                expected: dimension,
                found: vector.len(),
            });
        }
    }

    Ok(())
}

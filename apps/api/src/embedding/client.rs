/// Embedding client — the single point of entry for calls to the sentence-embedding server.
///
/// Speaks the text-embeddings-inference `/embed` protocol: a JSON batch of inputs in,
/// one vector per input out. No other module may talk to the embedding server directly.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{validate_batch, Embedder, EmbeddingError};

const MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
    normalize: bool,
    truncate: bool,
}

#[derive(Debug, Deserialize)]
struct EmbedErrorBody {
    error: String,
}

/// HTTP embedder with retry on 429 / 5xx and exponential backoff.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
    backoff: Duration,
}

impl EmbeddingClient {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(EmbeddingError::InvalidConfig(format!(
                "embedding URL must be http(s), got '{base_url}'"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{base}/embed"),
            model: model.into(),
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Overrides the base delay between retries (doubled on each attempt).
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request_body = EmbedRequest {
            inputs: texts,
            normalize: false,
            truncate: true,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .json(&request_body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding server returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<EmbedErrorBody>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let vectors: Vec<Vec<f32>> = response.json().await?;
            validate_batch(texts.len(), &vectors)?;

            debug!(
                model = %self.model,
                batch_size = texts.len(),
                dimension = vectors.first().map(Vec::len).unwrap_or(0),
                "Embedding call succeeded"
            );

            return Ok(vectors);
        }

        Err(last_error.unwrap_or(EmbeddingError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

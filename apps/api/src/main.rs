mod analysis;
mod config;
mod diff;
mod embedding;
mod errors;
mod matching;
mod models;
mod routes;
mod skills;
mod state;
mod validation;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::{Embedder, EmbeddingClient};
use crate::routes::build_router;
use crate::skills::{build_extractor, Vocabulary};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on values that do not parse)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match API v{}", env!("CARGO_PKG_VERSION"));

    // Load skill vocabulary (built-in list unless SKILL_VOCABULARY_PATH is set)
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => Vocabulary::from_file(path)
            .with_context(|| format!("loading skill vocabulary from {}", path.display()))?,
        None => Vocabulary::default(),
    };
    info!(
        "Skill vocabulary loaded ({} phrases from {})",
        vocabulary.len(),
        vocabulary.source()
    );

    // Initialize skill extractor (dictionary by default, swap via SKILL_STRATEGY)
    let extractor = build_extractor(config.skill_strategy, Arc::new(vocabulary));
    info!("Skill extractor initialized ({:?})", config.skill_strategy);

    // Initialize embedding client; the server is only contacted on semantic requests
    let client = EmbeddingClient::new(
        &config.embedding_url,
        config.embedding_model.clone(),
        Duration::from_secs(config.embedding_timeout_secs),
    )
    .context("building embedding client")?;
    info!(
        "Embedding client initialized (model: {}, endpoint: {})",
        client.model_id(),
        client.endpoint()
    );
    let embedder: Arc<dyn Embedder> = Arc::new(client);

    // Build app state
    let state = AppState::new(config.clone(), extractor, embedder);
    info!(
        "Lexical matcher initialized (stop words: {:?})",
        state.lexical.stop_words()
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

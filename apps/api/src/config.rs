use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::embedding::DEFAULT_MODEL;
use crate::matching::StopWords;
use crate::skills::SkillStrategy;

/// Application configuration loaded from environment variables.
/// Every setting has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_url: String,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
    /// Replaces the built-in skill list when set.
    pub skill_vocabulary_path: Option<PathBuf>,
    pub skill_strategy: SkillStrategy,
    pub stop_words: StopWords,
    pub max_jobs: usize,
    pub max_text_bytes: usize,
    /// Per-side word limit for the diff endpoint.
    pub max_diff_words: usize,
    pub default_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            embedding_url: "http://localhost:8081".to_string(),
            embedding_model: DEFAULT_MODEL.to_string(),
            embedding_timeout_secs: 30,
            skill_vocabulary_path: None,
            skill_strategy: SkillStrategy::Dictionary,
            stop_words: StopWords::None,
            max_jobs: 5,
            max_text_bytes: 200_000,
            max_diff_words: 2_000,
            default_top_n: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key → value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            port: parse_or(&get, "PORT", defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            embedding_url: get("EMBEDDING_URL").unwrap_or(defaults.embedding_url),
            embedding_model: get("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_timeout_secs: parse_or(
                &get,
                "EMBEDDING_TIMEOUT_SECS",
                defaults.embedding_timeout_secs,
            )?,
            skill_vocabulary_path: get("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            skill_strategy: parse_with(&get, "SKILL_STRATEGY", defaults.skill_strategy)?,
            stop_words: parse_with(&get, "STOPWORDS", defaults.stop_words)?,
            max_jobs: parse_or(&get, "MAX_JOBS", defaults.max_jobs)?,
            max_text_bytes: parse_or(&get, "MAX_TEXT_BYTES", defaults.max_text_bytes)?,
            max_diff_words: parse_or(&get, "MAX_DIFF_WORDS", defaults.max_diff_words)?,
            default_top_n: parse_or(&get, "DEFAULT_TOP_N", defaults.default_top_n)?,
        };

        if config.max_jobs == 0 {
            return Err(anyhow!("MAX_JOBS must be at least 1"));
        }

        Ok(config)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

/// Like `parse_or` for the crate's own enums, whose `FromStr` errors are plain strings.
fn parse_with<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr<Err = String>,
{
    match get(key) {
        Some(raw) => raw.parse::<T>().map_err(|e| anyhow!("{key}: {e}")),
        None => Ok(default),
    }
}

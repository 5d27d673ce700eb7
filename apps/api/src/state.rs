use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::matching::{LexicalMatcher, MatchMethod, Matcher, SemanticMatcher};
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable skill extractor. Default: dictionary scan. Swap via SKILL_STRATEGY.
    pub extractor: Arc<dyn SkillExtractor>,
    pub lexical: LexicalMatcher,
    /// Holds the one embedder instance shared by all requests.
    pub semantic: SemanticMatcher,
}

impl AppState {
    pub fn new(
        config: Config,
        extractor: Arc<dyn SkillExtractor>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            lexical: LexicalMatcher::new(config.stop_words),
            semantic: SemanticMatcher::new(embedder),
            config,
            extractor,
        }
    }

    pub fn matcher(&self, method: MatchMethod) -> Matcher<'_> {
        match method {
            MatchMethod::Lexical => Matcher::Lexical(&self.lexical),
            MatchMethod::Semantic => Matcher::Semantic(&self.semantic),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::embedding::testing::HashingEmbedder;
    use crate::skills::{build_extractor, SkillStrategy, Vocabulary};

    /// Default config, dictionary extraction, and the in-process hashing embedder.
    pub fn test_state() -> AppState {
        test_state_with(Arc::new(HashingEmbedder))
    }

    pub fn test_state_with(embedder: Arc<dyn Embedder>) -> AppState {
        let extractor = build_extractor(SkillStrategy::Dictionary, Arc::new(Vocabulary::default()));
        AppState::new(Config::default(), extractor, embedder)
    }
}

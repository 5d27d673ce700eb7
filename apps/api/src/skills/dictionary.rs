use std::sync::Arc;

use crate::skills::{normalize_label, SkillExtractor, SkillSet, SkillStrategy, Vocabulary};

/// Phrase-level vocabulary scan.
///
/// A phrase only counts when it is not glued to other word characters: "c" does not
/// fire inside "scala", "c++" or "c#", and "nose" does not fire inside "nose2".
#[derive(Debug, Clone)]
pub struct DictionaryExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl DictionaryExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl SkillExtractor for DictionaryExtractor {
    fn extract(&self, text: &str) -> SkillSet {
        let normalized = normalize_label(text);
        self.vocabulary
            .iter()
            .filter(|phrase| contains_phrase(&normalized, phrase))
            .collect()
    }

    fn strategy(&self) -> SkillStrategy {
        SkillStrategy::Dictionary
    }
}

/// Characters that extend a token: `c` followed by `++` is a different skill than `c`.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// True when `phrase` occurs in `text` with token boundaries on both sides.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    text.match_indices(phrase)
        .any(|(start, matched)| has_token_boundaries(text, start, start + matched.len()))
}

/// True when the byte range `start..end` of `text` is not glued to token characters.
pub(crate) fn has_token_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_token_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_token_char(c));
    before_ok && after_ok
}

//! Skills — extraction of normalized skill labels from free text, and gap analysis.
//!
//! Both extraction strategies sit behind `SkillExtractor`:
//! - `DictionaryExtractor` scans for phrases of a controlled `Vocabulary`
//! - `EntityExtractor` runs a rule-based recognizer and unions its spans with dictionary hits
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`, chosen at startup via `SKILL_STRATEGY`.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod dictionary;
pub mod entity;
pub mod gap;
pub mod handlers;
pub mod vocabulary;

pub use dictionary::DictionaryExtractor;
pub use entity::{EntityExtractor, PatternRecognizer};
pub use gap::{gaps, GapResult};
pub use vocabulary::{Vocabulary, VocabularyError};

/// Lower-cases a label and collapses internal whitespace.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A set of normalized skill labels. Iterates and serializes in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a label after normalizing it. Blank labels are ignored.
    pub fn insert(&mut self, label: &str) -> bool {
        let label = normalize_label(label);
        if label.is_empty() {
            return false;
        }
        self.0.insert(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Labels in `self` but not in `other`.
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.union(&other.0).cloned().collect())
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}

/// The capability "produces labeled skill tokens from text".
///
/// Implementations are pure: the same text always yields the same `SkillSet`,
/// regardless of call order or of other calls.
pub trait SkillExtractor: Send + Sync {
    fn extract(&self, text: &str) -> SkillSet;

    fn strategy(&self) -> SkillStrategy;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStrategy {
    #[default]
    Dictionary,
    Entity,
}

impl FromStr for SkillStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dictionary" | "dict" => Ok(SkillStrategy::Dictionary),
            "entity" | "ner" => Ok(SkillStrategy::Entity),
            other => Err(format!(
                "unknown skill strategy '{other}' (expected 'dictionary' or 'entity')"
            )),
        }
    }
}

/// Builds the extractor for `strategy` over `vocabulary`.
pub fn build_extractor(
    strategy: SkillStrategy,
    vocabulary: Arc<Vocabulary>,
) -> Arc<dyn SkillExtractor> {
    match strategy {
        SkillStrategy::Dictionary => Arc::new(DictionaryExtractor::new(vocabulary)),
        SkillStrategy::Entity => Arc::new(EntityExtractor::with_default_rules(
            DictionaryExtractor::new(vocabulary),
        )),
    }
}

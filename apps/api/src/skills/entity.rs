//! Entity-recognition skill extraction.
//!
//! A recognizer tags spans of the original (case-preserved) text with a category.
//! `EntityExtractor` keeps spans whose category is allowed and unions them with
//! dictionary hits, so anything the vocabulary knows is always reported.
//!
//! Every match must sit on token boundaries (see `has_token_boundaries`), so rules
//! can match bare symbolic names like `c#` without consuming their delimiters.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;

use crate::skills::dictionary::has_token_boundaries;
use crate::skills::{
    normalize_label, DictionaryExtractor, SkillExtractor, SkillSet, SkillStrategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Language,
    Framework,
    Tool,
    Platform,
    Certification,
    SoftSkill,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 6] = [
        EntityCategory::Language,
        EntityCategory::Framework,
        EntityCategory::Tool,
        EntityCategory::Platform,
        EntityCategory::Certification,
        EntityCategory::SoftSkill,
    ];
}

/// A recognized span, labeled in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: String,
    pub category: EntityCategory,
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

struct Rule {
    category: EntityCategory,
    pattern: Regex,
    /// Capture group holding the entity.
    group: usize,
}

/// Built-in rules: `(category, pattern, capture group)`.
const DEFAULT_RULES: &[(EntityCategory, &str, usize)] = &[
    // Node.js, Vue.js, Next.js
    (EntityCategory::Framework, r"(?i)\b([a-z][a-z0-9]*\.js)\b", 1),
    // C++, C#, F#, .NET
    (EntityCategory::Language, r"(?i)(c\+\+|c#|f#|\.net)", 1),
    // Curated names only: bare CamelCase also matches companies and degrees.
    (
        EntityCategory::Tool,
        r"(?i)\b(postgresql|mysql|sqlite|mariadb|mongodb|dynamodb|cockroachdb|clickhouse|graphql|tensorflow|pytorch|fastapi|numpy|scipy|javascript|typescript|github|gitlab|bitbucket|rabbitmq|elasticsearch|opensearch|cloudformation|circleci|openshift|langchain|powershell)\b",
        1,
    ),
    (
        EntityCategory::Platform,
        r"(?i)\b((?:aws|amazon|azure|gcp|google)\s+(?:lambda|s3|ec2|ecs|eks|rds|dynamodb|sqs|sns|functions|cloud run|bigquery|cosmos db|kubernetes engine))\b",
        1,
    ),
    (
        EntityCategory::Certification,
        r"(?i)\b((?:(?:aws|azure|gcp|google|cisco|oracle|salesforce|kubernetes|scrum)\s+)?certified\s+(?:[a-z]+\s+){0,3}?(?:architect|developer|administrator|engineer|practitioner|master|professional|associate|specialist))\b",
        1,
    ),
    (
        EntityCategory::Certification,
        r"\b(PMP|CKA|CKAD|CISSP|CCNA|CCNP|OSCP|CISM)\b",
        1,
    ),
    (
        EntityCategory::SoftSkill,
        r"(?i)\b(?:strong|excellent|effective|good|great|outstanding)\s+((?:verbal\s+|written\s+)?(?:communication|leadership|collaboration|negotiation|presentation|analytical|interpersonal|mentoring|stakeholder management|time management|problem[- ]solving))\b",
        1,
    ),
];

/// Regex-driven recognizer. Deterministic: rules run in a fixed order.
pub struct PatternRecognizer {
    rules: Vec<Rule>,
}

impl PatternRecognizer {
    pub fn new(rules: &[(EntityCategory, &str, usize)]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|&(category, pattern, group)| {
                Ok(Rule {
                    category,
                    pattern: Regex::new(pattern)?,
                    group,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES).expect("built-in entity patterns are valid")
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for captures in rule.pattern.captures_iter(text) {
                let Some(m) = captures.get(rule.group) else {
                    continue;
                };
                if has_token_boundaries(text, m.start(), m.end()) {
                    spans.push(EntitySpan {
                        label: normalize_label(m.as_str()),
                        category: rule.category,
                    });
                }
            }
        }
        spans
    }
}

/// Dictionary hits ∪ recognized entities of allowed categories.
pub struct EntityExtractor {
    dictionary: DictionaryExtractor,
    recognizer: Box<dyn EntityRecognizer>,
    allowed: BTreeSet<EntityCategory>,
}

impl EntityExtractor {
    pub fn new(
        dictionary: DictionaryExtractor,
        recognizer: Box<dyn EntityRecognizer>,
        allowed: impl IntoIterator<Item = EntityCategory>,
    ) -> Self {
        Self {
            dictionary,
            recognizer,
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn with_default_rules(dictionary: DictionaryExtractor) -> Self {
        Self::new(
            dictionary,
            Box::new(PatternRecognizer::default()),
            EntityCategory::ALL,
        )
    }
}

impl SkillExtractor for EntityExtractor {
    fn extract(&self, text: &str) -> SkillSet {
        let recognized: SkillSet = self
            .recognizer
            .recognize(text)
            .into_iter()
            .filter(|span| self.allowed.contains(&span.category))
            .map(|span| span.label)
            .collect();

        self.dictionary.extract(text).union(&recognized)
    }

    fn strategy(&self) -> SkillStrategy {
        SkillStrategy::Entity
    }
}

//! Controlled skill vocabulary: the labels a dictionary scan may emit.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::skills::normalize_label;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary file {path} contains no skill phrases")]
    Empty { path: PathBuf },
}

/// Built-in skill phrases: languages, tooling, CI, test frameworks, ML and soft skills.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "sql", "aws", "azure", "linux", "git", "docker",
    "kubernetes", "react", "nodejs", "express", "mongodb", "mysql", "postgresql",
    "c#", "c++", "c", "ruby", "php", "swift", "kotlin", "go", "rust", "scala",
    "html", "css", "sass", "less", "typescript", "jquery", "json", "xml", "yaml",
    "bash", "powershell", "shell", "npm", "yarn", "gradle", "maven", "sbt", "ivy",
    "jenkins", "circleci", "gitlab", "github", "travis", "circle", "appveyor",
    "selenium", "appium", "cypress", "jest", "mocha", "chai", "jasmine", "pytest",
    "unittest", "nose", "nose2", "tox", "coverage", "mockito", "junit",
    "testng", "spock", "cucumber", "behave", "robot", "wiremock",
    "machine learning", "deep learning", "ai", "ml", "nlp", "computer vision",
    "tensorflow", "pytorch", "keras", "scikit-learn", "pandas", "numpy", "scipy",
    "data analysis", "data science", "data engineering", "data visualization",
    "data cleaning", "data wrangling", "data processing", "data modeling",
    "communication", "teamwork", "leadership", "problem solving", "critical thinking",
    "project management", "agile", "scrum", "kanban", "waterfall", "devops", "cicd",
];

/// A normalized, deduplicated set of skill phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    phrases: BTreeSet<String>,
    source: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::from_phrases(DEFAULT_SKILLS.iter().copied(), "builtin")
    }
}

impl Vocabulary {
    pub fn from_phrases<I, S>(phrases: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| normalize_label(p.as_ref()))
                .filter(|p| !p.is_empty())
                .collect(),
            source: source.into(),
        }
    }

    /// Parses one phrase per line. Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str, source: impl Into<String>) -> Self {
        Self::from_phrases(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
            source,
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let contents = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let vocabulary = Self::parse(&contents, path.display().to_string());
        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(vocabulary)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.phrases.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Where the phrases came from: `builtin` or a file path.
    pub fn source(&self) -> &str {
        &self.source
    }
}

//! Lexical matching over a jointly fitted TF-IDF space.
//!
//! Weighting:
//! - tokens are runs of two or more word characters, lower-cased
//! - tf is the raw count of a term in a document
//! - idf = ln((1 + n) / (1 + df)) + 1, with `n` documents and `df` documents containing the term
//! - every document vector is L2-normalized
//!
//! The resume and all jobs of one request are fit together; scores from separately
//! fitted spaces are not comparable.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::similarity::{cosine, unit_score};
use crate::matching::{corpus, validate_input, MatchError};
use crate::models::ScorePair;

/// Stopword filtering applied while tokenizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    None,
    English,
}

impl StopWords {
    pub fn contains(&self, term: &str) -> bool {
        match self {
            StopWords::None => false,
            StopWords::English => ENGLISH_STOP_WORDS.contains(&term),
        }
    }
}

impl FromStr for StopWords {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" => Ok(StopWords::None),
            "english" | "en" => Ok(StopWords::English),
            other => Err(format!(
                "unknown stopword policy '{other}' (expected 'none' or 'english')"
            )),
        }
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "be", "became", "because", "become", "becomes",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides",
    "between", "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "done", "down", "during", "each", "either", "else", "elsewhere", "enough",
    "etc", "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few",
    "for", "former", "formerly", "from", "further", "had", "has", "have", "having", "he",
    "hence", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however",
    "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last", "latter",
    "least", "less", "many", "may", "me", "meanwhile", "might", "more", "moreover", "most",
    "mostly", "much", "must", "my", "myself", "namely", "neither", "never", "nevertheless",
    "next", "no", "nobody", "none", "nor", "not", "nothing", "now", "nowhere", "of", "off",
    "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please", "rather",
    "same", "seem", "seemed", "seeming", "seems", "several", "she", "should", "since", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "these", "they", "this",
    "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too",
    "toward", "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where", "whereas",
    "whereby", "wherein", "whether", "which", "while", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Splits text into lower-cased terms, dropping stopwords.
pub fn tokenize(text: &str, stop_words: StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !stop_words.contains(t))
        .map(str::to_string)
        .collect()
}

/// Stable identity of an ordered document sequence.
pub fn fingerprint<S: AsRef<str>>(documents: &[S]) -> u64 {
    let mut hasher = DefaultHasher::new();
    documents.len().hash(&mut hasher);
    for document in documents {
        document.as_ref().hash(&mut hasher);
    }
    hasher.finish()
}

/// TF-IDF vectors for one ordered document set, all in the same feature space.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    features: Vec<String>,
    vectors: Vec<Vec<f32>>,
    fingerprint: u64,
}

impl VectorSpace {
    /// Number of features (terms).
    pub fn dimension(&self) -> usize {
        self.features.len()
    }

    /// Number of documents the space was fit on.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vector(&self, document: usize) -> Option<&[f32]> {
        self.vectors.get(document).map(Vec::as_slice)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// True when `documents` is exactly the sequence this space was fit on.
    pub fn is_fitted_on<S: AsRef<str>>(&self, documents: &[S]) -> bool {
        documents.len() == self.len() && fingerprint(documents) == self.fingerprint
    }
}

/// Fits one joint TF-IDF space over `documents`, returning it with its sorted feature names.
pub fn vectorize<S: AsRef<str>>(
    documents: &[S],
    stop_words: StopWords,
) -> (VectorSpace, Vec<String>) {
    let tokenized: Vec<Vec<String>> = documents
        .iter()
        .map(|d| tokenize(d.as_ref(), stop_words))
        .collect();

    let features: Vec<String> = tokenized
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let index: HashMap<&str, usize> = features
        .iter()
        .enumerate()
        .map(|(i, f)| (f.as_str(), i))
        .collect();

    let counts: Vec<HashMap<usize, u32>> = tokenized
        .iter()
        .map(|tokens| {
            let mut tf = HashMap::new();
            for token in tokens {
                *tf.entry(index[token.as_str()]).or_insert(0) += 1;
            }
            tf
        })
        .collect();

    let mut df = vec![0_u32; features.len()];
    for tf in &counts {
        for &feature in tf.keys() {
            df[feature] += 1;
        }
    }

    let n = documents.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + f64::from(d))).ln() + 1.0)
        .collect();

    let vectors = counts
        .iter()
        .map(|tf| {
            let mut vector = vec![0.0_f64; features.len()];
            for (&feature, &count) in tf {
                vector[feature] = f64::from(count) * idf[feature];
            }
            let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
            vector
                .into_iter()
                .map(|w| if norm > 0.0 { (w / norm) as f32 } else { 0.0 })
                .collect()
        })
        .collect();

    debug!(
        documents = documents.len(),
        features = features.len(),
        "Fitted TF-IDF space"
    );

    let space = VectorSpace {
        features: features.clone(),
        vectors,
        fingerprint: fingerprint(documents),
    };
    (space, features)
}

/// Scores every job of a fitted `[resume] + jobs` space against the resume (document 0).
pub fn scores_from_space(space: &VectorSpace) -> Vec<ScorePair> {
    let Some(resume) = space.vector(0) else {
        return Vec::new();
    };

    (1..space.len())
        .filter_map(|doc| space.vector(doc).map(|v| (doc, v)))
        .map(|(doc, job)| ScorePair {
            job_index: doc - 1,
            score: unit_score(cosine(resume, job)),
        })
        .collect()
}

/// TF-IDF cosine matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalMatcher {
    stop_words: StopWords,
}

impl LexicalMatcher {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> StopWords {
        self.stop_words
    }

    pub fn vectorize<S: AsRef<str>>(&self, documents: &[S]) -> (VectorSpace, Vec<String>) {
        vectorize(documents, self.stop_words)
    }

    /// One score per job, in job order. A job sharing no terms with the resume scores 0.
    pub fn score<S: AsRef<str>>(
        &self,
        resume_text: &str,
        job_texts: &[S],
    ) -> Result<Vec<ScorePair>, MatchError> {
        validate_input(resume_text, job_texts)?;

        let documents = corpus(resume_text, job_texts);
        let (space, _) = self.vectorize(&documents);
        Ok(scores_from_space(&space))
    }
}

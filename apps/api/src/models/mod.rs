pub mod document;

pub use document::{Document, DocumentRole, KeywordScore, ScorePair};

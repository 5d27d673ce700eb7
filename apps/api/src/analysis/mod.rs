//! Analysis — the full resume-vs-jobs report: ranked scores, skill gaps, keywords.

pub mod handlers;
pub mod report;

pub use report::{analyze, AnalyzeRequest, MatchReport};

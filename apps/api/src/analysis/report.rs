//! Match report — runs one full matching request end to end.
//!
//! Flow: score every job with the selected matcher → explain lexical scores with shared
//!       keywords → extract skills from resume and each job → compute gaps → rank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::matching::keywords::{ensure_fitted_on, top_keywords};
use crate::matching::{corpus, LexicalMatcher, MatchError, MatchMethod, Matcher};
use crate::models::{Document, DocumentRole, KeywordScore};
use crate::skills::{gaps, SkillExtractor, SkillSet};

/// Characters of the job description echoed back in each result.
pub const PREVIEW_CHARS: usize = 500;

const FULL_COVERAGE_MESSAGE: &str = "All key skills matched for this job!";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub jobs: Vec<JobInput>,
    #[serde(default)]
    pub method: MatchMethod,
    pub top_n: Option<usize>,
    /// Attach the payload for the external tailoring collaborator to every result.
    #[serde(default)]
    pub include_tailoring: bool,
}

/// What the resume-tailoring collaborator receives for one job. Produced here,
/// never sent anywhere by this service.
#[derive(Debug, Clone, Serialize)]
pub struct TailoringInput {
    pub resume_text: String,
    pub job_title: Option<String>,
    pub job_text: String,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    /// 1-based position after sorting by score.
    pub rank: usize,
    /// Position in the request's `jobs` list.
    pub job_index: usize,
    pub title: Option<String>,
    pub score: f32,
    /// `score` as a percentage, rounded to two decimals.
    pub score_percent: f64,
    pub preview: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub coverage_message: String,
    /// Lexical method only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_keywords: Vec<KeywordScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailoring: Option<TailoringInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub id: Uuid,
    pub method: MatchMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub resume_skills: SkillSet,
    /// Sorted by descending score; equal scores keep request order.
    pub results: Vec<JobMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Builds the full report for one resume against every job in `request`.
///
/// Keywords are fitted over the same `[resume] + jobs` sequence the lexical score
/// uses, so each job's keywords explain exactly its own score.
pub async fn analyze(
    matcher: Matcher<'_>,
    lexical: &LexicalMatcher,
    extractor: &dyn SkillExtractor,
    request: &AnalyzeRequest,
    top_n: usize,
) -> Result<MatchReport, MatchError> {
    let resume = Document::resume(request.resume_text.as_str());
    let jobs: Vec<Document> = request
        .jobs
        .iter()
        .enumerate()
        .map(|(i, job)| Document::job(i, job.description.as_str()).with_title(job.title.clone()))
        .collect();

    // Step 1: score
    let scores = matcher.score(resume.text(), &jobs).await?;

    // Step 2: explain (lexical only)
    let mut keywords: Vec<Vec<KeywordScore>> = vec![Vec::new(); jobs.len()];
    if matcher.method() == MatchMethod::Lexical {
        let documents = corpus(resume.text(), &jobs);
        let (space, feature_names) = lexical.vectorize(&documents);
        ensure_fitted_on(&space, &documents)?;
        for (i, slot) in keywords.iter_mut().enumerate() {
            *slot = top_keywords(&space, &feature_names, 0, i + 1, top_n)?;
        }
    }

    // Step 3: skills and gaps
    let resume_skills = extractor.extract(resume.text());

    let mut results: Vec<JobMatch> = scores
        .iter()
        .zip(jobs.iter().zip(keywords))
        .map(|(pair, (job, top_keywords))| {
            debug_assert_eq!(job.role(), DocumentRole::Job(pair.job_index));
            let job_skills = extractor.extract(job.text());
            let gap = gaps(&resume_skills, &job_skills);
            let missing_skills = gap.missing().to_sorted_vec();

            let tailoring = request.include_tailoring.then(|| TailoringInput {
                resume_text: resume.text().to_string(),
                job_title: job.title().map(str::to_string),
                job_text: job.text().to_string(),
                missing_skills: missing_skills.clone(),
            });

            JobMatch {
                rank: 0,
                job_index: pair.job_index,
                title: job.title().map(str::to_string),
                score: pair.score,
                score_percent: to_percent(pair.score),
                preview: preview(job.text()),
                matched_skills: gap.matched().to_sorted_vec(),
                coverage_message: coverage_message(&missing_skills),
                missing_skills,
                top_keywords,
                tailoring,
            }
        })
        .collect();

    // Step 4: rank
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (position, result) in results.iter_mut().enumerate() {
        result.rank = position + 1;
    }

    let report = MatchReport {
        id: Uuid::new_v4(),
        method: matcher.method(),
        model: matcher.model_id().map(str::to_string),
        generated_at: Utc::now(),
        resume_skills,
        results,
    };

    info!(
        report_id = %report.id,
        method = report.method.as_str(),
        jobs = report.results.len(),
        top_score = report.results.first().map(|r| r.score).unwrap_or(0.0),
        "Built match report"
    );

    Ok(report)
}

fn to_percent(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 100.0
}

/// First `PREVIEW_CHARS` characters, with `...` when the text was cut.
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn coverage_message(missing: &[String]) -> String {
    if missing.is_empty() {
        FULL_COVERAGE_MESSAGE.to_string()
    } else {
        format!("Missing skills for this role: {}", missing.join(", "))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{FailingEmbedder, HashingEmbedder};
    use crate::matching::SemanticMatcher;
    use crate::skills::{DictionaryExtractor, Vocabulary};
    use std::sync::Arc;

    const RESUME: &str = "Experienced Python developer with AWS and Docker skills";
    const JOB: &str = "Looking for a Python engineer skilled in Kubernetes and AWS";

    fn extractor() -> DictionaryExtractor {
        DictionaryExtractor::new(Arc::new(Vocabulary::default()))
    }

    fn request(jobs: &[(&str, &str)], method: MatchMethod) -> AnalyzeRequest {
        AnalyzeRequest {
            resume_text: RESUME.to_string(),
            jobs: jobs
                .iter()
                .map(|(title, description)| JobInput {
                    title: Some(title.to_string()),
                    description: description.to_string(),
                })
                .collect(),
            method,
            top_n: None,
            include_tailoring: false,
        }
    }

    #[tokio::test]
    async fn test_lexical_report_ranks_and_explains() {
        let lexical = LexicalMatcher::default();
        let req = request(
            &[("Gardener", "Prune roses, water plants"), ("Platform", JOB)],
            MatchMethod::Lexical,
        );

        let report = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();

        assert_eq!(report.method, MatchMethod::Lexical);
        assert!(report.model.is_none());
        assert_eq!(report.results.len(), 2);

        let best = &report.results[0];
        assert_eq!(best.rank, 1);
        assert_eq!(best.job_index, 1);
        assert_eq!(best.title.as_deref(), Some("Platform"));
        assert_eq!(best.missing_skills, vec!["kubernetes"]);
        assert_eq!(best.matched_skills, vec!["aws", "python"]);
        assert_eq!(
            best.coverage_message,
            "Missing skills for this role: kubernetes"
        );
        assert!(best.top_keywords.iter().any(|k| k.term == "python"));
        assert!(best.top_keywords.len() <= 5);

        let worst = &report.results[1];
        assert_eq!(worst.rank, 2);
        assert_eq!(worst.score, 0.0);
        assert!(worst.top_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_semantic_report_reports_model_and_skips_keywords() {
        let lexical = LexicalMatcher::default();
        let semantic = SemanticMatcher::new(Arc::new(HashingEmbedder));
        let req = request(&[("Platform", JOB)], MatchMethod::Semantic);

        let report = analyze(Matcher::Semantic(&semantic), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();

        assert_eq!(report.model.as_deref(), Some("test/hashing-bow"));
        assert!(report.results[0].top_keywords.is_empty());
        assert_eq!(report.results[0].missing_skills, vec!["kubernetes"]);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_request_order() {
        let lexical = LexicalMatcher::default();
        let req = request(&[("First", JOB), ("Second", JOB)], MatchMethod::Lexical);

        let report = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();

        assert_eq!(report.results[0].score, report.results[1].score);
        assert_eq!(report.results[0].job_index, 0);
        assert_eq!(report.results[1].job_index, 1);
    }

    #[tokio::test]
    async fn test_full_coverage_message() {
        let lexical = LexicalMatcher::default();
        let req = request(&[("Ops", "We need Docker and AWS")], MatchMethod::Lexical);

        let report = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();

        assert!(report.results[0].missing_skills.is_empty());
        assert_eq!(report.results[0].coverage_message, FULL_COVERAGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_tailoring_payload_is_opt_in() {
        let lexical = LexicalMatcher::default();
        let mut req = request(&[("Platform", JOB)], MatchMethod::Lexical);

        let without = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();
        assert!(without.results[0].tailoring.is_none());

        req.include_tailoring = true;
        let with = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap();
        let tailoring = with.results[0].tailoring.as_ref().unwrap();
        assert_eq!(tailoring.resume_text, RESUME);
        assert_eq!(tailoring.job_text, JOB);
        assert_eq!(tailoring.job_title.as_deref(), Some("Platform"));
        assert_eq!(tailoring.missing_skills, vec!["kubernetes"]);
    }

    #[tokio::test]
    async fn test_empty_jobs_is_rejected() {
        let lexical = LexicalMatcher::default();
        let req = request(&[], MatchMethod::Lexical);

        let err = analyze(Matcher::Lexical(&lexical), &lexical, &extractor(), &req, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::InsufficientInput(_)));
    }

    #[tokio::test]
    async fn test_embedding_failure_fails_the_report() {
        let lexical = LexicalMatcher::default();
        let semantic = SemanticMatcher::new(Arc::new(FailingEmbedder));
        let req = request(&[("Platform", JOB)], MatchMethod::Semantic);

        let err = analyze(Matcher::Semantic(&semantic), &lexical, &extractor(), &req, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Scoring(_)));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(PREVIEW_CHARS + 10);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short job"), "short job");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(PREVIEW_CHARS + 1);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_to_percent_rounds_two_decimals() {
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
    }
}

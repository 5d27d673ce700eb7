use serde::Serialize;

use crate::skills::SkillSet;

/// Outcome of comparing a job's skills against a resume's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapResult {
    /// Skills the job asks for that the resume lacks.
    missing: SkillSet,
    /// Skills the job asks for that the resume covers.
    matched: SkillSet,
}

impl GapResult {
    pub fn missing(&self) -> &SkillSet {
        &self.missing
    }

    pub fn matched(&self) -> &SkillSet {
        &self.matched
    }

    /// True when the resume covers every skill the job lists.
    pub fn is_fully_covered(&self) -> bool {
        self.missing.is_empty()
    }
}

/// `job_skills − resume_skills`. The difference is asymmetric: resume-only skills are
/// never reported.
pub fn gaps(resume_skills: &SkillSet, job_skills: &SkillSet) -> GapResult {
    GapResult {
        missing: job_skills.difference(resume_skills),
        matched: job_skills.intersection(resume_skills),
    }
}

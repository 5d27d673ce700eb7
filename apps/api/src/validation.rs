//! Request-size guards applied by handlers before any scoring work.

use crate::config::Config;
use crate::errors::AppError;

/// Rejects a text field larger than `MAX_TEXT_BYTES`.
pub fn check_text(config: &Config, field: &str, text: &str) -> Result<(), AppError> {
    if text.len() > config.max_text_bytes {
        return Err(AppError::Validation(format!(
            "{field} is {} bytes; the limit is {}",
            text.len(),
            config.max_text_bytes
        )));
    }
    Ok(())
}

/// Rejects more than `MAX_JOBS` job descriptions. An empty list is left to the
/// matchers, which report it as insufficient input.
pub fn check_jobs<S: AsRef<str>>(config: &Config, job_texts: &[S]) -> Result<(), AppError> {
    if job_texts.len() > config.max_jobs {
        return Err(AppError::Validation(format!(
            "{} job descriptions supplied; at most {} are allowed",
            job_texts.len(),
            config.max_jobs
        )));
    }
    for (i, text) in job_texts.iter().enumerate() {
        check_text(config, &format!("job_texts[{i}]"), text.as_ref())?;
    }
    Ok(())
}

/// Rejects a diff side with more than `MAX_DIFF_WORDS` words.
pub fn check_word_count(config: &Config, field: &str, text: &str) -> Result<(), AppError> {
    let words = text.split_whitespace().count();
    if words > config.max_diff_words {
        return Err(AppError::Validation(format!(
            "{field} has {words} words; the limit is {}",
            config.max_diff_words
        )));
    }
    Ok(())
}

//! Aggregate field validation.
//!
//! Validators collect one message per offending field instead of failing on
//! the first, so the API can surface the complete list in a single response.

use std::sync::LazyLock;

use regex::Regex;

use crate::job::Job;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Maximum listing title length.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate registration input. Empty result means valid.
pub fn validate_registration(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    if first_name.trim().is_empty() {
        errors.push("First name is required".to_string());
    }
    if last_name.trim().is_empty() {
        errors.push("Last name is required".to_string());
    }
    if email.trim().is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(email.trim()) {
        errors.push("Please enter a valid email".to_string());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 8 characters".to_string());
    }

    errors
}

/// Validate a listing against its domain constraints. Empty result means valid.
pub fn validate_job(job: &Job) -> Vec<String> {
    let mut errors = Vec::new();

    if job.title.trim().is_empty() {
        errors.push("Job title is required".to_string());
    } else if job.title.len() > MAX_TITLE_LENGTH {
        errors.push("Job title cannot exceed 100 characters".to_string());
    }
    if job.company.trim().is_empty() {
        errors.push("Company name is required".to_string());
    }
    if job.location.trim().is_empty() {
        errors.push("Job location is required".to_string());
    }
    if job.description.trim().is_empty() {
        errors.push("Job description is required".to_string());
    }
    if job.requirements.trim().is_empty() {
        errors.push("Job requirements are required".to_string());
    }
    if job.responsibilities.trim().is_empty() {
        errors.push("Job responsibilities are required".to_string());
    }
    if job.skills.iter().all(|s| s.trim().is_empty()) {
        errors.push("Skills are required".to_string());
    }
    if job.salary.min < 0 {
        errors.push("Minimum salary cannot be negative".to_string());
    }
    if job.salary.min > job.salary.max {
        errors.push("Minimum salary cannot exceed maximum salary".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::tests::test_job;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co.uk"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@foo.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_registration_collects_all_errors() {
        let errors = validate_registration("", "", "not-an-email", "short");
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("First name")));
        assert!(errors.iter().any(|e| e.contains("valid email")));
        assert!(errors.iter().any(|e| e.contains("at least 8")));
    }

    #[test]
    fn test_registration_valid() {
        assert!(validate_registration("Ada", "Lovelace", "ada@example.com", "longenough").is_empty());
    }

    #[test]
    fn test_job_validation() {
        let job = test_job();
        assert!(validate_job(&job).is_empty());

        let mut bad = test_job();
        bad.title = String::new();
        bad.skills = vec![String::new()];
        bad.salary.min = 200_000; // above max
        let errors = validate_job(&bad);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_job_title_length() {
        let mut job = test_job();
        job.title = "x".repeat(101);
        let errors = validate_job(&job);
        assert!(errors.iter().any(|e| e.contains("100 characters")));
    }
}

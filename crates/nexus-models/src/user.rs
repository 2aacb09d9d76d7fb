//! User identity models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::{ApplicationStatus, JobId};

/// Unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Account role. Determines which lifecycle operations a caller may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Can apply to listings and manage saved/applied jobs.
    #[default]
    JobSeeker,
    /// Can create listings and manage their applicants.
    Employer,
    /// Unrestricted; passes every ownership check.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "job-seeker",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mirror entry on the user for an application submitted to a listing.
///
/// The listing's embedded `Application` is the source of truth; this copy is
/// kept in sync by the lifecycle engine on every status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJob {
    pub job: JobId,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

impl AppliedJob {
    pub fn new(job: JobId) -> Self {
        Self {
            job,
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        }
    }
}

/// A registered account.
///
/// The password hash is never serialized, on any code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercase; uniqueness is case-insensitive.
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub saved_jobs: Vec<JobId>,
    #[serde(default)]
    pub applied_jobs: Vec<AppliedJob>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account. The email is normalized to lowercase.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into().trim().to_lowercase(),
            password_hash: password_hash.into(),
            role,
            company: None,
            position: None,
            location: None,
            bio: None,
            skills: Vec::new(),
            saved_jobs: Vec::new(),
            applied_jobs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True if the user already has a saved-jobs entry for the listing.
    pub fn has_saved(&self, job: &JobId) -> bool {
        self.saved_jobs.contains(job)
    }

    /// Mirror entry for a listing, if the user has applied to it.
    pub fn applied_job_mut(&mut self, job: &JobId) -> Option<&mut AppliedJob> {
        self.applied_jobs.iter_mut().find(|a| &a.job == job)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_generation() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_email_normalized_on_creation() {
        let user = User::new("Ada", "Lovelace", "  Ada@Example.COM ", "hash", Role::Employer);
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("Ada", "Lovelace", "ada@example.com", "s3cret-hash", Role::JobSeeker);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("s3cret-hash"));
        assert!(!json.to_lowercase().contains("password"));
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::JobSeeker).unwrap(), "\"job-seeker\"");
        assert_eq!(serde_json::to_string(&Role::Employer).unwrap(), "\"employer\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_applied_job_lookup() {
        let mut user = User::new("A", "B", "a@b.co", "h", Role::JobSeeker);
        let job = JobId::new();
        user.applied_jobs.push(AppliedJob::new(job.clone()));

        let entry = user.applied_job_mut(&job).unwrap();
        entry.status = ApplicationStatus::Interviewed;
        assert_eq!(user.applied_jobs[0].status, ApplicationStatus::Interviewed);
        assert!(user.applied_job_mut(&JobId::new()).is_none());
    }
}

//! Job listing models and the embedded application sub-collection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::user::UserId;

/// Unique identifier for a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an application embedded in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
            JobType::Internship => "Internship",
        }
    }
}

/// Listing category. Closed set; unknown categories never match a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    #[serde(rename = "IT & Software")]
    ItSoftware,
    #[serde(rename = "Finance & Accounting")]
    FinanceAccounting,
    #[serde(rename = "Marketing & Sales")]
    MarketingSales,
    #[serde(rename = "Healthcare & Medical")]
    HealthcareMedical,
    #[serde(rename = "Engineering & Construction")]
    EngineeringConstruction,
    #[serde(rename = "Administrative & Clerical")]
    AdministrativeClerical,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Education & Training")]
    EducationTraining,
    Legal,
    Other,
}

impl JobCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::ItSoftware => "IT & Software",
            JobCategory::FinanceAccounting => "Finance & Accounting",
            JobCategory::MarketingSales => "Marketing & Sales",
            JobCategory::HealthcareMedical => "Healthcare & Medical",
            JobCategory::EngineeringConstruction => "Engineering & Construction",
            JobCategory::AdministrativeClerical => "Administrative & Clerical",
            JobCategory::HumanResources => "Human Resources",
            JobCategory::EducationTraining => "Education & Training",
            JobCategory::Legal => "Legal",
            JobCategory::Other => "Other",
        }
    }
}

/// Required experience bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "0-1 years")]
    Years0To1,
    #[serde(rename = "1-2 years")]
    Years1To2,
    #[serde(rename = "2-4 years")]
    Years2To4,
    #[serde(rename = "3-5 years")]
    Years3To5,
    #[serde(rename = "5+ years")]
    Years5Plus,
    #[serde(rename = "7+ years")]
    Years7Plus,
    #[serde(rename = "10+ years")]
    Years10Plus,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Years0To1 => "0-1 years",
            ExperienceLevel::Years1To2 => "1-2 years",
            ExperienceLevel::Years2To4 => "2-4 years",
            ExperienceLevel::Years3To5 => "3-5 years",
            ExperienceLevel::Years5Plus => "5+ years",
            ExperienceLevel::Years7Plus => "7+ years",
            ExperienceLevel::Years10Plus => "10+ years",
        }
    }
}

/// Required education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Associate Degree")]
    AssociateDegree,
    #[serde(rename = "Bachelor's Degree")]
    BachelorsDegree,
    #[serde(rename = "Master's Degree")]
    MastersDegree,
    #[serde(rename = "PhD")]
    Phd,
    Other,
}

/// Listing lifecycle status. Only active listings are publicly queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Applicant status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Interviewed,
    Rejected,
    Offered,
    Hired,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Hired => "hired",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a status string is not one of the closed enum values.
#[derive(Debug, Error)]
#[error("'{0}' is not a valid application status")]
pub struct StatusParseError(pub String);

impl FromStr for ApplicationStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "interviewed" => Ok(ApplicationStatus::Interviewed),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "offered" => Ok(ApplicationStatus::Offered),
            "hired" => Ok(ApplicationStatus::Hired),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// Salary range for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub min: i64,
    pub max: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} - {}{}", self.currency, self.min, self.currency, self.max)
    }
}

/// An application embedded in a listing's `applicants` sequence.
///
/// Source of truth for the applicant's status; the applicant's own
/// `appliedJobs` entry is a projection of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user: UserId,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl Application {
    pub fn new(user: UserId, cover_letter: Option<String>, resume: Option<String>) -> Self {
        Self {
            id: ApplicationId::new(),
            user,
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
            cover_letter,
            resume,
        }
    }
}

/// A job listing owned by an employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: JobCategory,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub salary: Salary,
    pub experience: ExperienceLevel,
    pub education: EducationLevel,
    pub skills: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Immutable after creation; always the creating caller's id.
    pub employer: UserId,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applicants: Vec<Application>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn applicant_count(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }

    /// True if a deadline is set and already behind `now`.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.application_deadline.map(|d| d < now).unwrap_or(false)
    }

    /// True if the user already has an application on this listing.
    pub fn has_applicant(&self, user: &UserId) -> bool {
        self.applicants.iter().any(|a| &a.user == user)
    }

    pub fn applicant(&self, id: &ApplicationId) -> Option<&Application> {
        self.applicants.iter().find(|a| &a.id == id)
    }

    pub fn applicant_mut(&mut self, id: &ApplicationId) -> Option<&mut Application> {
        self.applicants.iter_mut().find(|a| &a.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&JobType::FullTime).unwrap(), "\"Full-time\"");
        assert_eq!(
            serde_json::to_string(&JobCategory::ItSoftware).unwrap(),
            "\"IT & Software\""
        );
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::Years5Plus).unwrap(),
            "\"5+ years\""
        );
        assert_eq!(serde_json::to_string(&JobStatus::Active).unwrap(), "\"active\"");
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "interviewed".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Interviewed
        );
        assert!("shortlisted".parse::<ApplicationStatus>().is_err());
        // Parsing is exact: no case folding on the wire value.
        assert!("Hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_deadline_passed() {
        let mut job = test_job();
        assert!(!job.deadline_passed(Utc::now()));

        job.application_deadline = Some(Utc::now() - chrono::Duration::hours(1));
        assert!(job.deadline_passed(Utc::now()));

        job.application_deadline = Some(Utc::now() + chrono::Duration::hours(1));
        assert!(!job.deadline_passed(Utc::now()));
    }

    #[test]
    fn test_duplicate_applicant_detection() {
        let mut job = test_job();
        let seeker = UserId::new();
        assert!(!job.has_applicant(&seeker));

        job.applicants.push(Application::new(seeker.clone(), None, None));
        assert!(job.has_applicant(&seeker));
        assert_eq!(job.applicant_count(), 1);
    }

    pub(crate) fn test_job() -> Job {
        let now = Utc::now();
        Job {
            id: JobId::new(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            category: JobCategory::ItSoftware,
            description: "Build services".to_string(),
            requirements: "Rust".to_string(),
            responsibilities: "Ship".to_string(),
            salary: Salary {
                min: 90_000,
                max: 140_000,
                currency: "USD".to_string(),
            },
            experience: ExperienceLevel::Years2To4,
            education: EducationLevel::BachelorsDegree,
            skills: vec!["rust".to_string()],
            benefits: Vec::new(),
            employer: UserId::new(),
            logo: String::new(),
            status: JobStatus::Active,
            application_deadline: None,
            applicants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

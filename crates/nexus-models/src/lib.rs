//! Shared data models for the Nexus job board backend.
//!
//! This crate provides Serde-serializable types for:
//! - Users, roles, and the applied-jobs mirror
//! - Job listings with their embedded applicant sub-collection
//! - The application status lifecycle
//! - Listing query filters, sort keys, and pagination math
//! - Aggregate field validation

pub mod job;
pub mod query;
pub mod user;
pub mod validate;

// Re-export common types
pub use job::{
    Application, ApplicationId, ApplicationStatus, EducationLevel, ExperienceLevel, Job,
    JobCategory, JobId, JobStatus, JobType, Salary, StatusParseError,
};
pub use query::{total_pages, JobFilter, JobPage, JobSort};
pub use user::{AppliedJob, Role, User, UserId};
pub use validate::{
    is_valid_email, validate_job, validate_registration, MAX_TITLE_LENGTH, MIN_PASSWORD_LENGTH,
};

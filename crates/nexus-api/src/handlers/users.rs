//! Profile and saved/applied job handlers.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use nexus_models::{ApplicationStatus, Job, JobId, JobStatus, JobType, User, MIN_PASSWORD_LENGTH};

use crate::auth::{self, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const JOB_NOT_FOUND: &str = "Job not found";

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/users/profile
pub async fn profile(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        success: true,
        user,
    })
}

/// Allow-listed profile fields. Everything else in the payload, including
/// email, role, and password, is silently ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    if let Some(first_name) = req.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        user.last_name = last_name;
    }
    if let Some(company) = req.company {
        user.company = Some(company);
    }
    if let Some(position) = req.position {
        user.position = Some(position);
    }
    if let Some(location) = req.location {
        user.location = Some(location);
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    if let Some(skills) = req.skills {
        user.skills = skills;
    }
    user.touch();

    let user = state.users.update(user).await?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// PUT /api/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if !auth::verify_password(&req.current_password, &user.password_hash) {
        return Err(ApiError::unauthenticated("Current password is incorrect"));
    }
    if req.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(vec![
            "Password must be at least 8 characters".to_string(),
        ]));
    }

    user.password_hash = auth::hash_password(&req.new_password)?;
    user.touch();
    state.users.update(user).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Password updated successfully".to_string(),
    }))
}

/// POST /api/users/jobs/:id/save
pub async fn save_job(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let job_id = JobId::from(id);
    state
        .jobs
        .get(&job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    if user.has_saved(&job_id) {
        return Err(ApiError::duplicate("Job already saved"));
    }

    user.saved_jobs.push(job_id.clone());
    user.touch();
    state.users.update(user).await?;

    info!(job_id = %job_id, "job saved");

    Ok(Json(MessageResponse {
        success: true,
        message: "Job saved successfully".to_string(),
    }))
}

/// DELETE /api/users/jobs/:id/save
pub async fn unsave_job(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let job_id = JobId::from(id);
    if !user.has_saved(&job_id) {
        return Err(ApiError::invalid_state("Job not saved"));
    }

    user.saved_jobs.retain(|j| j != &job_id);
    user.touch();
    state.users.update(user).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Job removed from saved jobs".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<Job>,
}

/// GET /api/users/saved-jobs
///
/// Saved references to listings deleted since saving are skipped, not
/// errors.
pub async fn saved_jobs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<JobsResponse>> {
    let mut jobs = Vec::with_capacity(user.saved_jobs.len());
    for job_id in &user.saved_jobs {
        if let Some(job) = state.jobs.get(job_id).await? {
            jobs.push(job);
        }
    }

    Ok(Json(JobsResponse {
        success: true,
        count: jobs.len(),
        jobs,
    }))
}

/// Trimmed listing summary attached to each applied-jobs entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Job> for JobSummary {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            status: job.status,
            created_at: job.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobView {
    pub job: JobSummary,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobsResponse {
    pub success: bool,
    pub count: usize,
    pub applied_jobs: Vec<AppliedJobView>,
}

/// GET /api/users/applied-jobs
pub async fn applied_jobs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<AppliedJobsResponse>> {
    let mut entries = Vec::with_capacity(user.applied_jobs.len());
    for applied in &user.applied_jobs {
        // Listings deleted after the application are skipped.
        if let Some(job) = state.jobs.get(&applied.job).await? {
            entries.push(AppliedJobView {
                job: JobSummary::from(job),
                status: applied.status,
                applied_at: applied.applied_at,
            });
        }
    }

    Ok(Json(AppliedJobsResponse {
        success: true,
        count: entries.len(),
        applied_jobs: entries,
    }))
}

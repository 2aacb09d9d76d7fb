//! Listing lifecycle and application workflow handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use nexus_models::{
    total_pages, validate_job, Application, ApplicationId, ApplicationStatus, EducationLevel,
    ExperienceLevel, Job, JobCategory, JobFilter, JobId, JobSort, JobStatus, JobType, Role,
    Salary, User, UserId,
};

use nexus_mailer::Notification;

use crate::auth::{require_owner, require_role, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::notify;
use crate::state::AppState;

const JOB_NOT_FOUND: &str = "Job not found";
const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct ListJobsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    /// `"min-max"` or `"min"`.
    pub salary: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListJobsQuery {
    fn filter(&self) -> JobFilter {
        let mut filter = JobFilter::active();
        filter.search = self.search.clone().filter(|s| !s.is_empty());
        filter.category = self.category.clone().filter(|s| !s.is_empty());
        filter.job_type = self.job_type.clone().filter(|s| !s.is_empty());
        filter.location = self.location.clone().filter(|s| !s.is_empty());
        filter.experience = self.experience.clone().filter(|s| !s.is_empty());
        if let Some(raw) = &self.salary {
            let (min, max) = JobFilter::parse_salary(raw);
            filter.salary_min = min;
            filter.salary_max = max;
        }
        filter
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub success: bool,
    /// Listings on this page.
    pub count: usize,
    /// Listings matching the filter, across all pages.
    pub total_jobs: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/jobs
///
/// Public listing query. Only active listings are visible regardless of the
/// supplied filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Json<JobListResponse>> {
    let filter = query.filter();
    let sort = JobSort::from_str_or_default(query.sort.as_deref().unwrap_or(""));
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);

    let result = state.jobs.search(&filter, sort, page, limit).await?;

    Ok(Json(JobListResponse {
        success: true,
        count: result.jobs.len(),
        total_jobs: result.total,
        total_pages: total_pages(result.total, limit),
        current_page: page,
        jobs: result.jobs,
    }))
}

/// GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JobResponse>> {
    let job = state
        .jobs
        .get(&JobId::from(id))
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    Ok(Json(JobResponse { success: true, job }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub category: JobCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub responsibilities: String,
    pub salary: Salary,
    pub experience: ExperienceLevel,
    pub education: EducationLevel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub status: JobStatus,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    require_role(
        &user,
        &[Role::Employer, Role::Admin],
        "Only employers can create job listings",
    )?;

    let now = Utc::now();
    let job = Job {
        id: JobId::new(),
        title: req.title,
        company: req.company,
        location: req.location,
        job_type: req.job_type,
        category: req.category,
        description: req.description,
        requirements: req.requirements,
        responsibilities: req.responsibilities,
        salary: req.salary,
        experience: req.experience,
        education: req.education,
        skills: req.skills,
        benefits: req.benefits,
        // Ownership comes from the session, never the payload.
        employer: user.id.clone(),
        logo: req.logo,
        status: req.status,
        application_deadline: req.application_deadline,
        applicants: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let errors = validate_job(&job);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let job = state.jobs.insert(job).await?;
    info!(job_id = %job.id, employer = %user.id, "created job listing");

    Ok((StatusCode::CREATED, Json(JobResponse { success: true, job })))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub category: Option<JobCategory>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub salary: Option<Salary>,
    pub experience: Option<ExperienceLevel>,
    pub education: Option<EducationLevel>,
    pub skills: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub logo: Option<String>,
    pub status: Option<JobStatus>,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// PUT /api/jobs/:id
///
/// Existence is checked before ownership, so probing an unowned id and a
/// missing id are distinguishable only after the 404.
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateJobRequest>,
) -> ApiResult<Json<JobResponse>> {
    let mut job = state
        .jobs
        .get(&JobId::from(id))
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    require_owner(&user, &job.employer, "update this job")?;

    if let Some(title) = req.title {
        job.title = title;
    }
    if let Some(company) = req.company {
        job.company = company;
    }
    if let Some(location) = req.location {
        job.location = location;
    }
    if let Some(job_type) = req.job_type {
        job.job_type = job_type;
    }
    if let Some(category) = req.category {
        job.category = category;
    }
    if let Some(description) = req.description {
        job.description = description;
    }
    if let Some(requirements) = req.requirements {
        job.requirements = requirements;
    }
    if let Some(responsibilities) = req.responsibilities {
        job.responsibilities = responsibilities;
    }
    if let Some(salary) = req.salary {
        job.salary = salary;
    }
    if let Some(experience) = req.experience {
        job.experience = experience;
    }
    if let Some(education) = req.education {
        job.education = education;
    }
    if let Some(skills) = req.skills {
        job.skills = skills;
    }
    if let Some(benefits) = req.benefits {
        job.benefits = benefits;
    }
    if let Some(logo) = req.logo {
        job.logo = logo;
    }
    if let Some(status) = req.status {
        job.status = status;
    }
    if let Some(deadline) = req.application_deadline {
        job.application_deadline = Some(deadline);
    }
    job.touch();

    let errors = validate_job(&job);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let job = state.jobs.update(job).await?;

    Ok(Json(JobResponse { success: true, job }))
}

/// DELETE /api/jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let job_id = JobId::from(id);
    let job = state
        .jobs
        .get(&job_id)
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    require_owner(&user, &job.employer, "delete this job")?;

    state.jobs.delete(&job_id).await?;
    info!(job_id = %job_id, "deleted job listing");

    Ok(Json(MessageResponse {
        success: true,
        message: "Job deleted successfully".to_string(),
    }))
}

/// GET /api/jobs/employer/jobs
pub async fn employer_jobs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<JobsResponse>> {
    require_role(
        &user,
        &[Role::Employer, Role::Admin],
        "Only employers can access their posted jobs",
    )?;

    let jobs = state.jobs.by_employer(&user.id).await?;

    Ok(Json(JobsResponse {
        success: true,
        count: jobs.len(),
        jobs,
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
    pub resume: Option<String>,
}

/// POST /api/jobs/:id/apply
///
/// Two sequential writes: the application is appended to the listing first,
/// then the mirror entry is added to the applicant. A crash between the two
/// leaves the listing as the source of truth.
pub async fn apply(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    require_role(&user, &[Role::JobSeeker], "Only job seekers can apply for jobs")?;

    let mut job = state
        .jobs
        .get(&JobId::from(id))
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    if !job.is_active() {
        return Err(ApiError::invalid_state(
            "This job is no longer accepting applications",
        ));
    }
    if job.deadline_passed(Utc::now()) {
        return Err(ApiError::invalid_state("Application deadline has passed"));
    }
    if job.has_applicant(&user.id) {
        return Err(ApiError::duplicate("You have already applied for this job"));
    }

    let application = Application::new(user.id.clone(), req.cover_letter, req.resume);
    job.applicants.push(application);
    job.touch();
    let job = state.jobs.update(job).await?;

    user.applied_jobs.push(nexus_models::AppliedJob::new(job.id.clone()));
    user.touch();
    let user = state.users.update(user).await?;

    info!(job_id = %job.id, applicant = %user.id, "application submitted");

    notify::dispatch(
        state.notifier.clone(),
        Notification::ApplicationSubmitted {
            to: user.email.clone(),
            applicant_name: user.full_name(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
        },
    );

    // Both writes are committed; a failed employer lookup must not turn the
    // apply into an error, so it only costs the employer notification.
    match state.users.get(&job.employer).await {
        Ok(Some(employer)) => notify::dispatch(
            state.notifier.clone(),
            Notification::ApplicationReceived {
                to: employer.email.clone(),
                employer_name: employer.full_name(),
                job_id: job.id.clone(),
                job_title: job.title.clone(),
                applicant_name: user.full_name(),
                applicant_email: user.email.clone(),
            },
        ),
        Ok(None) => {}
        Err(e) => warn!(job_id = %job.id, error = %e, "employer lookup for notification failed"),
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "Application submitted successfully".to_string(),
        }),
    ))
}

/// Applicant identity joined onto an application record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantIdentity {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub skills: Vec<String>,
}

impl From<User> for ApplicantIdentity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            location: user.location,
            skills: user.skills,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    pub id: ApplicationId,
    pub user: ApplicantIdentity,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantsResponse {
    pub success: bool,
    pub count: usize,
    pub applicants: Vec<ApplicantView>,
}

/// GET /api/jobs/:id/applicants
pub async fn applicants(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApplicantsResponse>> {
    let job = state
        .jobs
        .get(&JobId::from(id))
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    require_owner(&user, &job.employer, "view applicants for this job")?;

    let mut views = Vec::with_capacity(job.applicants.len());
    for application in job.applicants {
        // Applicants whose accounts have since been deleted are skipped.
        if let Some(applicant) = state.users.get(&application.user).await? {
            views.push(ApplicantView {
                id: application.id,
                user: ApplicantIdentity::from(applicant),
                status: application.status,
                applied_at: application.applied_at,
                cover_letter: application.cover_letter,
                resume: application.resume,
            });
        }
    }

    Ok(Json(ApplicantsResponse {
        success: true,
        count: views.len(),
        applicants: views,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// PUT /api/jobs/:id/applicants/:applicant_id
///
/// Transitions an application's status, mirrors the new status onto the
/// applicant's own record, and notifies the applicant by email.
pub async fn update_applicant_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id, applicant_id)): Path<(String, String)>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let status: ApplicationStatus = req
        .status
        .parse()
        .map_err(|e: nexus_models::StatusParseError| ApiError::Validation(vec![e.to_string()]))?;

    let mut job = state
        .jobs
        .get(&JobId::from(id))
        .await?
        .ok_or_else(|| ApiError::not_found(JOB_NOT_FOUND))?;

    require_owner(&user, &job.employer, "update applicant status")?;

    let applicant_id = ApplicationId::from(applicant_id.as_str());
    let application = job
        .applicant_mut(&applicant_id)
        .ok_or_else(|| ApiError::not_found("Applicant not found"))?;
    application.status = status;
    let applicant_user_id = application.user.clone();
    job.touch();

    let job = state.jobs.update(job).await?;

    // Mirror write; the listing is already committed, so a failure here
    // leaves a stale projection, not a wrong source of truth.
    if let Some(mut applicant) = state.users.get(&applicant_user_id).await? {
        if let Some(entry) = applicant.applied_job_mut(&job.id) {
            entry.status = status;
        }
        applicant.touch();
        let applicant = state.users.update(applicant).await?;

        notify::dispatch(
            state.notifier.clone(),
            Notification::StatusChanged {
                to: applicant.email.clone(),
                applicant_name: applicant.full_name(),
                job_id: job.id.clone(),
                job_title: job.title.clone(),
                company: job.company.clone(),
                status,
            },
        );
    }

    info!(job_id = %job.id, applicant_id = %applicant_id, status = %status, "applicant status updated");

    Ok(Json(MessageResponse {
        success: true,
        message: "Applicant status updated successfully".to_string(),
    }))
}

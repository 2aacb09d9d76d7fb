//! In-memory document store.
//!
//! Each collection is a `HashMap` behind its own `RwLock`; a single write
//! holds the lock for the whole replace, which gives the document-level
//! atomicity the design assumes of the external database. Cross-document
//! sequences (apply, status mirror) remain two independent writes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use nexus_models::{Job, JobFilter, JobId, JobPage, JobSort, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::{JobStore, UserStore};

/// In-process store backing both repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let email = user.email.to_lowercase();
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::already_exists(format!("user email {email}")));
        }
        users.insert(user.id.clone(), user.clone());
        debug!(user_id = %user.id, "inserted user");
        Ok(user)
    }

    async fn get(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::not_found(format!("user {}", user.id)));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn insert(&self, job: Job) -> StoreResult<Job> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(StoreError::already_exists(format!("job {}", job.id)));
        }
        jobs.insert(job.id.clone(), job.clone());
        debug!(job_id = %job.id, "inserted job");
        Ok(job)
    }

    async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        Ok(self.jobs.read().await.get(id).cloned())
    }

    async fn update(&self, job: Job) -> StoreResult<Job> {
        let mut jobs = self.jobs.write().await;
        if !jobs.contains_key(&job.id) {
            return Err(StoreError::not_found(format!("job {}", job.id)));
        }
        jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn delete(&self, id: &JobId) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        jobs.remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(format!("job {id}")))
    }

    async fn by_employer(&self, employer: &UserId) -> StoreResult<Vec<Job>> {
        let jobs = self.jobs.read().await;
        let mut owned: Vec<Job> = jobs
            .values()
            .filter(|j| &j.employer == employer)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn search(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        page: u32,
        limit: u32,
    ) -> StoreResult<JobPage> {
        let jobs = self.jobs.read().await;
        let mut matched: Vec<Job> = jobs.values().filter(|j| filter.matches(j)).cloned().collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        let total = matched.len() as u64;
        let limit = limit.max(1) as usize;
        let skip = (page.max(1) as usize - 1) * limit;
        let jobs = matched.into_iter().skip(skip).take(limit).collect();

        Ok(JobPage { jobs, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use nexus_models::{
        Application, EducationLevel, ExperienceLevel, JobCategory, JobStatus, JobType, Role, Salary,
    };

    fn seed_user(email: &str, role: Role) -> User {
        User::new("Test", "User", email, "hash", role)
    }

    fn seed_job(employer: &UserId, title: &str, max_salary: i64) -> Job {
        let now = Utc::now();
        Job {
            id: JobId::new(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            job_type: JobType::FullTime,
            category: JobCategory::ItSoftware,
            description: "desc".to_string(),
            requirements: "req".to_string(),
            responsibilities: "resp".to_string(),
            salary: Salary {
                min: max_salary / 2,
                max: max_salary,
                currency: "USD".to_string(),
            },
            experience: ExperienceLevel::Years2To4,
            education: EducationLevel::BachelorsDegree,
            skills: vec!["rust".to_string()],
            benefits: Vec::new(),
            employer: employer.clone(),
            logo: String::new(),
            status: JobStatus::Active,
            application_deadline: None,
            applicants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitive() {
        let store = MemoryStore::new();
        UserStore::insert(&store, seed_user("ada@example.com", Role::JobSeeker))
            .await
            .unwrap();

        let dup = UserStore::insert(&store, seed_user("ADA@Example.Com", Role::Employer)).await;
        assert!(matches!(dup, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_by_email_case_insensitive() {
        let store = MemoryStore::new();
        let user = UserStore::insert(&store, seed_user("ada@example.com", Role::JobSeeker))
            .await
            .unwrap();

        let found = store.find_by_email("Ada@EXAMPLE.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let store = MemoryStore::new();
        let ghost = seed_user("ghost@example.com", Role::JobSeeker);
        assert!(matches!(
            UserStore::update(&store, ghost).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_pagination() {
        let store = MemoryStore::new();
        let employer = UserId::new();
        for i in 0..5 {
            let mut job = seed_job(&employer, &format!("Job {i}"), 100_000 + i * 10_000);
            job.created_at = Utc::now() + Duration::seconds(i);
            JobStore::insert(&store, job).await.unwrap();
        }

        let filter = JobFilter::active();
        let page = store
            .search(&filter, JobSort::SalaryHighToLow, 1, 2)
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.jobs.len(), 2);
        assert_eq!(page.total_pages(2), 3);
        assert!(page.jobs[0].salary.max >= page.jobs[1].salary.max);

        // Page past the end is empty, not an error.
        let beyond = store
            .search(&filter, JobSort::SalaryHighToLow, 4, 2)
            .await
            .unwrap();
        assert!(beyond.jobs.is_empty());
        assert_eq!(beyond.total, 5);
    }

    #[tokio::test]
    async fn test_search_excludes_inactive() {
        let store = MemoryStore::new();
        let employer = UserId::new();
        let mut draft = seed_job(&employer, "Draft role", 100_000);
        draft.status = JobStatus::Draft;
        let mut closed = seed_job(&employer, "Closed role", 100_000);
        closed.status = JobStatus::Closed;
        JobStore::insert(&store, draft).await.unwrap();
        JobStore::insert(&store, closed).await.unwrap();
        JobStore::insert(&store, seed_job(&employer, "Open role", 100_000))
            .await
            .unwrap();

        let page = store
            .search(&JobFilter::active(), JobSort::Newest, 1, 10)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.jobs[0].title, "Open role");
    }

    #[tokio::test]
    async fn test_by_employer_newest_first_any_status() {
        let store = MemoryStore::new();
        let employer = UserId::new();
        let other = UserId::new();

        let mut old = seed_job(&employer, "Old", 100_000);
        old.created_at = Utc::now() - Duration::hours(2);
        old.status = JobStatus::Closed;
        let fresh = seed_job(&employer, "Fresh", 100_000);
        JobStore::insert(&store, old).await.unwrap();
        JobStore::insert(&store, fresh).await.unwrap();
        JobStore::insert(&store, seed_job(&other, "Theirs", 100_000))
            .await
            .unwrap();

        let owned = store.by_employer(&employer).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].title, "Fresh");
        assert_eq!(owned[1].title, "Old");
    }

    #[tokio::test]
    async fn test_job_update_replaces_document() {
        let store = MemoryStore::new();
        let employer = UserId::new();
        let mut job = JobStore::insert(&store, seed_job(&employer, "Role", 100_000))
            .await
            .unwrap();

        job.applicants.push(Application::new(UserId::new(), None, None));
        JobStore::update(&store, job.clone()).await.unwrap();

        let reloaded = JobStore::get(&store, &job.id).await.unwrap().unwrap();
        assert_eq!(reloaded.applicant_count(), 1);
    }
}

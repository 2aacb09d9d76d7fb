//! Store interface boundary for the Nexus backend.
//!
//! Persistence, indexing, and querying are delegated to an external document
//! database; this crate specifies that collaborator as two repository traits
//! and ships `MemoryStore`, an in-process implementation with per-document
//! write atomicity. The lifecycle engine only ever talks to the traits.

pub mod error;
pub mod memory;

use async_trait::async_trait;

use nexus_models::{Job, JobFilter, JobId, JobPage, JobSort, User, UserId};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Repository for user documents.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with `AlreadyExists` if the email is taken
    /// (case-insensitive).
    async fn insert(&self, user: User) -> StoreResult<User>;

    async fn get(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Lookup by email, case-insensitive.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Replace the stored document. Fails with `NotFound` if absent.
    async fn update(&self, user: User) -> StoreResult<User>;
}

/// Repository for job listing documents.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert(&self, job: Job) -> StoreResult<Job>;

    async fn get(&self, id: &JobId) -> StoreResult<Option<Job>>;

    /// Replace the stored document. Fails with `NotFound` if absent.
    async fn update(&self, job: Job) -> StoreResult<Job>;

    async fn delete(&self, id: &JobId) -> StoreResult<()>;

    /// All listings owned by an employer, any status, newest first.
    async fn by_employer(&self, employer: &UserId) -> StoreResult<Vec<Job>>;

    /// Filtered, sorted, paginated query. `page` is 1-indexed.
    async fn search(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        page: u32,
        limit: u32,
    ) -> StoreResult<JobPage>;
}

//! Repository traits: the persistence seam.
//!
//! The stores in `services` are the sole writers of the registration and
//! submission collections, and they reach storage only through these
//! traits. Implementations live in the `persistence` crate: an in-memory
//! backend (also the test substrate) and a Postgres backend.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::registration::Registration;
use crate::models::submission::Submission;
use crate::models::user::UserRole;
use crate::models::{Category, User};

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated (e.g. duplicate email).
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    /// Returns the updated user, or `None` when the id is unknown.
    async fn update_role(&self, id: Uuid, role: UserRole) -> RepositoryResult<Option<User>>;
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Category>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Category>>;
    async fn upsert(&self, category: Category) -> RepositoryResult<Category>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn create(&self, registration: Registration) -> RepositoryResult<Registration>;
    /// Replaces the stored record; returns `None` when the id is unknown.
    async fn update(&self, registration: Registration) -> RepositoryResult<Option<Registration>>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Registration>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Registration>>;
    async fn list_by_host(&self, host_id: Uuid) -> RepositoryResult<Vec<Registration>>;
    async fn delete(&self, id: Uuid) -> RepositoryResult<bool>;
    /// Unknown ids are a no-op; view counting never errors a page render.
    async fn increment_view_count(&self, id: Uuid) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Inserts the submission and increments the parent registration's
    /// `submission_count` as one atomic operation. Either both land or
    /// neither does; no reader ever sees a submission without its
    /// count, and a failed write leaves nothing behind.
    async fn create_and_count(&self, submission: Submission) -> RepositoryResult<Submission>;
    /// Replaces the stored record; returns `None` when the id is unknown.
    async fn update(&self, submission: Submission) -> RepositoryResult<Option<Submission>>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Submission>>;
    /// Ordered by `submitted_at` ascending (insertion order).
    async fn list_by_registration(&self, registration_id: Uuid)
        -> RepositoryResult<Vec<Submission>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Submission>>;
    /// Deletes the submission and decrements the parent's counter in
    /// the same atomic operation. Returns `false` for an unknown id.
    async fn delete_and_count(&self, id: Uuid) -> RepositoryResult<bool>;
    /// Removes all submissions of a registration; returns how many.
    /// The parent's counter is untouched (used when deleting the
    /// registration itself).
    async fn delete_by_registration(&self, registration_id: Uuid) -> RepositoryResult<u64>;
}

//! In-memory repository backend.
//!
//! Used when no database is configured (the platform then runs on demo
//! fixtures, mirroring the mock-data fallback of the original client)
//! and as the substrate for tests. All collections live behind one
//! `RwLock`, so readers always observe a consistent snapshot of a
//! registration together with its submissions.

pub mod seed;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use domain::models::registration::Registration;
use domain::models::submission::Submission;
use domain::models::user::UserRole;
use domain::models::{Category, User};
use domain::repository::{
    CategoryRepository, RegistrationRepository, RepositoryError, RepositoryResult,
    SubmissionRepository, UserRepository,
};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    categories: Vec<Category>,
    registrations: HashMap<Uuid, Registration>,
    /// Insertion order doubles as display order for submissions.
    submissions: Vec<Submission>,
}

/// Shared in-memory backend implementing every repository trait.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<State>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-loaded with the demo fixtures.
    pub fn seeded() -> Self {
        let backend = Self::new();
        seed::load(&backend);
        backend
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Backend("state lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Backend("state lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for MemoryBackend {
    async fn create(&self, user: User) -> RepositoryResult<User> {
        let mut state = self.write()?;
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(RepositoryError::Duplicate(user.email));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> RepositoryResult<Option<User>> {
        let mut state = self.write()?;
        Ok(state.users.get_mut(&id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }
}

#[async_trait]
impl CategoryRepository for MemoryBackend {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    async fn upsert(&self, category: Category) -> RepositoryResult<Category> {
        let mut state = self.write()?;
        match state.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => state.categories.push(category.clone()),
        }
        Ok(category)
    }
}

#[async_trait]
impl RegistrationRepository for MemoryBackend {
    async fn create(&self, registration: Registration) -> RepositoryResult<Registration> {
        self.write()?
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn update(
        &self,
        registration: Registration,
    ) -> RepositoryResult<Option<Registration>> {
        let mut state = self.write()?;
        match state.registrations.get_mut(&registration.id) {
            Some(existing) => {
                *existing = registration.clone();
                Ok(Some(registration))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Registration>> {
        Ok(self.read()?.registrations.get(&id).cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Registration>> {
        Ok(self.read()?.registrations.values().cloned().collect())
    }

    async fn list_by_host(&self, host_id: Uuid) -> RepositoryResult<Vec<Registration>> {
        Ok(self
            .read()?
            .registrations
            .values()
            .filter(|r| r.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        Ok(self.write()?.registrations.remove(&id).is_some())
    }

    async fn increment_view_count(&self, id: Uuid) -> RepositoryResult<()> {
        if let Some(reg) = self.write()?.registrations.get_mut(&id) {
            reg.view_count += 1;
        }
        Ok(())
    }

}

#[async_trait]
impl SubmissionRepository for MemoryBackend {
    async fn create_and_count(&self, submission: Submission) -> RepositoryResult<Submission> {
        // Single write acquisition: the submission and the counter
        // land together or not at all.
        let mut state = self.write()?;
        let registration = state
            .registrations
            .get_mut(&submission.registration_id)
            .ok_or_else(|| {
                RepositoryError::Backend("submission references unknown registration".to_string())
            })?;
        registration.submission_count += 1;
        state.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn update(&self, submission: Submission) -> RepositoryResult<Option<Submission>> {
        let mut state = self.write()?;
        match state.submissions.iter_mut().find(|s| s.id == submission.id) {
            Some(existing) => {
                *existing = submission.clone();
                Ok(Some(submission))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Submission>> {
        Ok(self
            .read()?
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_by_registration(
        &self,
        registration_id: Uuid,
    ) -> RepositoryResult<Vec<Submission>> {
        Ok(self
            .read()?
            .submissions
            .iter()
            .filter(|s| s.registration_id == registration_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        Ok(self.read()?.submissions.clone())
    }

    async fn delete_and_count(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(pos) = state.submissions.iter().position(|s| s.id == id) else {
            return Ok(false);
        };
        let registration_id = state.submissions.remove(pos).registration_id;
        if let Some(registration) = state.registrations.get_mut(&registration_id) {
            registration.submission_count = (registration.submission_count - 1).max(0);
        }
        Ok(true)
    }

    async fn delete_by_registration(&self, registration_id: Uuid) -> RepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.submissions.len();
        state
            .submissions
            .retain(|s| s.registration_id != registration_id);
        Ok((before - state.submissions.len()) as u64)
    }
}

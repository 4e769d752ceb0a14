//! Registration store: creation, lifecycle transitions, and queries.
//!
//! All writes go through this store so state-machine legality and the
//! derived counters stay enforceable. Mutations on the same entity are
//! serialized by a store-level mutex shared with the submission store;
//! reads resolve expiry lazily from `end_date`.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;
use crate::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationStatus, SearchFilters, SortKey, Visibility,
};
use crate::models::user::{User, UserRole};
use crate::repository::{CategoryRepository, RegistrationRepository, SubmissionRepository};
use crate::services::access;

pub struct RegistrationStore {
    registrations: Arc<dyn RegistrationRepository>,
    categories: Arc<dyn CategoryRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    /// Serializes mutations across both stores. Contention is low, so a
    /// single lock beats per-entity locking here.
    write_lock: Arc<Mutex<()>>,
}

impl RegistrationStore {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        categories: Arc<dyn CategoryRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        write_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            registrations,
            categories,
            submissions,
            write_lock,
        }
    }

    /// Creates a registration owned by `actor`.
    ///
    /// The window (`start_date`..`end_date`) is computed from the
    /// requested duration at creation. A complete form schema yields
    /// status `pending` (awaiting payment confirmation); an incomplete
    /// one yields `draft`.
    pub async fn create(
        &self,
        actor: &User,
        request: CreateRegistrationRequest,
    ) -> Result<Registration, DomainError> {
        if !access::can_create_registration(actor) {
            return Err(DomainError::Unauthorized(
                "Only hosts can create registrations".to_string(),
            ));
        }

        request.validate()?;

        let category = self
            .categories
            .find_by_id(&request.category)
            .await?
            .ok_or_else(|| DomainError::validation("category"))?;
        if category.admin_only && actor.role != UserRole::Admin {
            return Err(DomainError::validation("category"));
        }

        let now = Utc::now();
        // An incomplete schema produces a draft, not an error.
        let schema_complete = !request.form_schema.is_empty()
            && request.form_schema.iter().all(|f| f.schema_errors().is_empty());

        let registration = Registration {
            id: Uuid::new_v4(),
            host_id: actor.id,
            host_name: actor.name.clone(),
            title: request.title,
            description: request.description,
            category: category.id,
            visibility: request.visibility,
            duration: request.duration,
            status: if schema_complete {
                RegistrationStatus::Pending
            } else {
                RegistrationStatus::Draft
            },
            start_date: now,
            end_date: Registration::window_end(now, request.duration),
            view_count: 0,
            submission_count: 0,
            featured: false,
            verified: false,
            form_schema: request.form_schema,
            created_at: now,
        };

        let created = self.registrations.create(registration).await?;
        info!(
            registration_id = %created.id,
            host_id = %created.host_id,
            status = %created.status,
            "Registration created"
        );
        Ok(created)
    }

    /// Fetches a registration with lazy expiry applied.
    pub async fn get(&self, id: Uuid) -> Result<Registration, DomainError> {
        let registration = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))?;
        Ok(resolve_expiry(registration))
    }

    /// Moves a completed draft into `pending` (awaiting approval).
    pub async fn submit_for_publishing(
        &self,
        id: Uuid,
        actor: &User,
    ) -> Result<Registration, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can publish".to_string(),
            ));
        }
        if registration.status != RegistrationStatus::Draft {
            return Err(DomainError::invalid_state(
                registration.status.as_str(),
                "submit for publishing",
            ));
        }

        let mut missing = Vec::new();
        if registration.title.trim().is_empty() {
            missing.push("title".to_string());
        }
        if registration.description.trim().is_empty() {
            missing.push("description".to_string());
        }
        if registration.category.trim().is_empty() {
            missing.push("category".to_string());
        }
        missing.extend(registration.schema_errors());
        if !missing.is_empty() {
            return Err(DomainError::Validation { fields: missing });
        }

        registration.status = RegistrationStatus::Pending;
        self.persist(registration).await
    }

    /// `pending -> active`: the admin-side reaction to a confirmed
    /// payment. Marks the registration verified.
    pub async fn approve(&self, id: Uuid, actor: &User) -> Result<Registration, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can approve".to_string(),
            ));
        }
        if registration.status != RegistrationStatus::Pending {
            return Err(DomainError::invalid_state(
                registration.status.as_str(),
                "approve",
            ));
        }

        registration.status = RegistrationStatus::Active;
        registration.verified = true;
        info!(registration_id = %id, actor_id = %actor.id, "Registration approved");
        self.persist(registration).await
    }

    /// `pending -> rejected`: payment confirmation declined. Terminal.
    pub async fn reject(&self, id: Uuid, actor: &User) -> Result<Registration, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can reject".to_string(),
            ));
        }
        if registration.status != RegistrationStatus::Pending {
            return Err(DomainError::invalid_state(
                registration.status.as_str(),
                "reject",
            ));
        }

        registration.status = RegistrationStatus::Rejected;
        info!(registration_id = %id, actor_id = %actor.id, "Registration rejected");
        self.persist(registration).await
    }

    /// `active -> paused`.
    pub async fn pause(&self, id: Uuid, actor: &User) -> Result<Registration, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can pause".to_string(),
            ));
        }
        let effective = registration.effective_status(Utc::now());
        if effective != RegistrationStatus::Active {
            return Err(DomainError::invalid_state(effective.as_str(), "pause"));
        }

        registration.status = RegistrationStatus::Paused;
        self.persist(registration).await
    }

    /// `paused -> active`, unless the window has closed, in which case
    /// the registration is forced to `expired` and the resume fails.
    pub async fn resume(&self, id: Uuid, actor: &User) -> Result<Registration, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can resume".to_string(),
            ));
        }
        if registration.status != RegistrationStatus::Paused {
            return Err(DomainError::invalid_state(
                registration.status.as_str(),
                "resume",
            ));
        }
        if Utc::now() > registration.end_date {
            registration.status = RegistrationStatus::Expired;
            self.persist(registration).await?;
            return Err(DomainError::Expired(
                "registration window has ended".to_string(),
            ));
        }

        registration.status = RegistrationStatus::Active;
        self.persist(registration).await
    }

    /// Toggles the admin-controlled featured flag.
    pub async fn set_featured(
        &self,
        id: Uuid,
        actor: &User,
        featured: bool,
    ) -> Result<Registration, DomainError> {
        if !access::can_manage_users(actor) {
            return Err(DomainError::Unauthorized(
                "Only admins can feature registrations".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut registration = self.find_for_update(id).await?;
        registration.featured = featured;
        self.persist(registration).await
    }

    /// Deletes a registration and all of its submissions.
    pub async fn delete(&self, id: Uuid, actor: &User) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let registration = self.find_for_update(id).await?;
        if !access::can_publish(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can delete".to_string(),
            ));
        }

        let removed = self.submissions.delete_by_registration(id).await?;
        self.registrations.delete(id).await?;
        info!(registration_id = %id, submissions_removed = removed, "Registration deleted");
        Ok(())
    }

    /// Bumps the view counter. Unknown ids are a no-op and backend
    /// failures are swallowed; view counting must never fail a page.
    pub async fn increment_view(&self, id: Uuid) {
        if let Err(e) = self.registrations.increment_view_count(id).await {
            warn!(registration_id = %id, error = %e, "Failed to record view");
        }
    }

    /// Searches registrations.
    ///
    /// Defaults to effectively-active registrations. Private
    /// registrations never appear here; they stay reachable by direct
    /// id and through the owner's listing. Every
    /// space-separated query term must match the title, description,
    /// category, or host name (case-insensitive substring). Sorting is
    /// stable for equal keys.
    pub async fn search(
        &self,
        query: Option<&str>,
        filters: &SearchFilters,
        sort: SortKey,
    ) -> Result<Vec<Registration>, DomainError> {
        let mut results: Vec<Registration> = self
            .registrations
            .list_all()
            .await?
            .into_iter()
            .map(resolve_expiry)
            .filter(|reg| reg.visibility == Visibility::Public)
            .filter(|reg| match filters.status {
                Some(status) => reg.status == status,
                None => reg.status == RegistrationStatus::Active,
            })
            .filter(|reg| {
                filters
                    .category
                    .as_ref()
                    .map_or(true, |c| reg.category.eq_ignore_ascii_case(c))
            })
            .filter(|reg| filters.featured.map_or(true, |f| reg.featured == f))
            .collect();

        if let Some(query) = query {
            let terms: Vec<String> = query
                .split_whitespace()
                .map(|t| t.to_lowercase())
                .collect();
            if !terms.is_empty() {
                results.retain(|reg| {
                    let haystack = format!(
                        "{} {} {} {}",
                        reg.title, reg.description, reg.category, reg.host_name
                    )
                    .to_lowercase();
                    terms.iter().all(|term| haystack.contains(term))
                });
            }
        }

        // Vec::sort_by is stable, so equal keys keep their prior order.
        match sort {
            SortKey::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Popular => results.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
            SortKey::Submissions => {
                results.sort_by(|a, b| b.submission_count.cmp(&a.submission_count))
            }
            SortKey::Ending => results.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
        }

        Ok(results)
    }

    /// All registrations owned by a host, any status, newest first.
    pub async fn list_by_host(&self, host_id: Uuid) -> Result<Vec<Registration>, DomainError> {
        let mut results: Vec<Registration> = self
            .registrations
            .list_by_host(host_id)
            .await?
            .into_iter()
            .map(resolve_expiry)
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    async fn find_for_update(&self, id: Uuid) -> Result<Registration, DomainError> {
        self.registrations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))
    }

    async fn persist(&self, registration: Registration) -> Result<Registration, DomainError> {
        self.registrations
            .update(registration)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))
    }
}

/// Rewrites the stored status with the lazily-derived one for reads.
fn resolve_expiry(mut registration: Registration) -> Registration {
    registration.status = registration.effective_status(Utc::now());
    registration
}

//! Submission store: intake and review workflow.
//!
//! Owns the submission collection and keeps the parent registration's
//! `submission_count` in lockstep: the submission write and the counter
//! update are one atomic repository operation, never recomputed by
//! readers, and a failed write leaves neither behind.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::submission::{is_empty_value, SubmitRequest, Submission, SubmissionStatus};
use crate::models::user::User;
use crate::repository::{RegistrationRepository, SubmissionRepository};
use crate::services::access;

pub struct SubmissionStore {
    submissions: Arc<dyn SubmissionRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    /// Shared with `RegistrationStore`; serializes all mutations.
    write_lock: Arc<Mutex<()>>,
}

impl SubmissionStore {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        write_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            submissions,
            registrations,
            write_lock,
        }
    }

    /// Records a submission against an open registration.
    ///
    /// The target must be effectively active, and every required field
    /// of its form schema must carry a non-empty value. The returned
    /// validation error enumerates the labels of the missing fields.
    pub async fn submit(
        &self,
        registration_id: Uuid,
        request: SubmitRequest,
        user_id: Option<Uuid>,
    ) -> Result<Submission, DomainError> {
        let _guard = self.write_lock.lock().await;

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))?;

        let now = Utc::now();
        if !registration.is_open_for_submissions(now) {
            return Err(DomainError::Closed(format!(
                "registration is {}",
                registration.effective_status(now)
            )));
        }

        let missing: Vec<String> = registration
            .form_schema
            .iter()
            .filter(|field| field.required)
            .filter(|field| is_empty_value(request.form_data.get(&field.id)))
            .map(|field| field.label.clone())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::Validation { fields: missing });
        }

        let submission = Submission {
            id: Uuid::new_v4(),
            registration_id,
            user_id,
            form_data: request.form_data,
            files: request.files,
            status: SubmissionStatus::Pending,
            notes: None,
            submitted_at: now,
        };

        let created = self.submissions.create_and_count(submission).await?;

        info!(
            submission_id = %created.id,
            registration_id = %registration_id,
            "Submission recorded"
        );
        Ok(created)
    }

    /// Classifies a submission as approved, rejected, or scheduled.
    ///
    /// `pending` is only ever the initial state; it is never a valid
    /// target. The other three remain mutable between each other so a
    /// host can re-classify after the fact.
    pub async fn set_status(
        &self,
        submission_id: Uuid,
        new_status: SubmissionStatus,
        actor: &User,
        notes: Option<String>,
    ) -> Result<Submission, DomainError> {
        if new_status == SubmissionStatus::Pending {
            return Err(DomainError::invalid_state("reviewed", "return to pending"));
        }

        let _guard = self.write_lock.lock().await;

        let mut submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| DomainError::not_found("submission"))?;
        let registration = self
            .registrations
            .find_by_id(submission.registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))?;

        if !access::can_approve_submission(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can review submissions".to_string(),
            ));
        }

        submission.status = new_status;
        if notes.is_some() {
            submission.notes = notes;
        }

        let updated = self
            .submissions
            .update(submission)
            .await?
            .ok_or_else(|| DomainError::not_found("submission"))?;
        info!(
            submission_id = %submission_id,
            status = %updated.status,
            actor_id = %actor.id,
            "Submission reviewed"
        );
        Ok(updated)
    }

    /// Deletes a submission; the parent's counter comes down in the
    /// same atomic repository operation.
    pub async fn delete(&self, submission_id: Uuid, actor: &User) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| DomainError::not_found("submission"))?;
        let registration = self
            .registrations
            .find_by_id(submission.registration_id)
            .await?
            .ok_or_else(|| DomainError::not_found("registration"))?;

        if !access::can_approve_submission(actor, &registration) {
            return Err(DomainError::Unauthorized(
                "Only the owning host or an admin can delete submissions".to_string(),
            ));
        }

        self.submissions.delete_and_count(submission_id).await?;
        Ok(())
    }

    /// Submissions for a registration in insertion order, optionally
    /// filtered by status.
    pub async fn list_by_registration(
        &self,
        registration_id: Uuid,
        status_filter: Option<SubmissionStatus>,
    ) -> Result<Vec<Submission>, DomainError> {
        if self
            .registrations
            .find_by_id(registration_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("registration"));
        }

        let mut submissions = self
            .submissions
            .list_by_registration(registration_id)
            .await?;
        if let Some(status) = status_filter {
            submissions.retain(|s| s.status == status);
        }
        Ok(submissions)
    }
}

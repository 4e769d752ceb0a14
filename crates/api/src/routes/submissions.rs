//! Submission endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::submission::{Submission, SubmissionStatus, SubmitRequest};
use domain::services::access;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, OptionalCurrentUser};
use crate::middleware::metrics::record_submission_received;

/// Submit a filled form against an open registration.
///
/// POST /api/v1/registrations/:id/submissions
///
/// Anonymous submissions are allowed; a valid token attributes the
/// submission to the caller.
pub async fn create_submission(
    State(state): State<AppState>,
    OptionalCurrentUser(user): OptionalCurrentUser,
    Path(registration_id): Path<Uuid>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Submission>), ApiError> {
    let submission = state
        .submissions
        .submit(registration_id, request, user.map(|u| u.id))
        .await?;
    record_submission_received();
    Ok((StatusCode::CREATED, Json(submission)))
}

#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub status: Option<SubmissionStatus>,
}

/// List submissions for a registration (owner or admin).
///
/// GET /api/v1/registrations/:id/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(registration_id): Path<Uuid>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let registration = state.registrations.get(registration_id).await?;
    if !access::can_approve_submission(&user, &registration) {
        return Err(ApiError::Forbidden(
            "Only the owner or an admin can view submissions".to_string(),
        ));
    }

    let submissions = state
        .submissions
        .list_by_registration(registration_id, query.status)
        .await?;
    Ok(Json(submissions))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: SubmissionStatus,
    pub notes: Option<String>,
}

/// Review a submission.
///
/// PUT /api/v1/submissions/:id/status
pub async fn set_submission_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<Submission>, ApiError> {
    let submission = state
        .submissions
        .set_status(id, request.status, &user, request.notes)
        .await?;
    Ok(Json(submission))
}

/// Delete a submission (owner or admin).
///
/// DELETE /api/v1/submissions/:id
pub async fn delete_submission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.submissions.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

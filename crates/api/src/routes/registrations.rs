//! Registration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::registration::{
    CreateRegistrationRequest, Registration, RegistrationStatus, SearchFilters, SortKey,
};
use domain::models::UserRole;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, OptionalCurrentUser};
use crate::middleware::metrics::record_registration_created;

/// Query parameters for registration search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Space-separated search terms; all must match.
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<RegistrationStatus>,
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort: SortKey,
}

/// Search active registrations.
///
/// Only admins may filter by a non-active status; for everyone else
/// the filter is clamped so unapproved listings cannot be enumerated.
/// Hosts see their own drafts and pending entries via `/mine`.
///
/// GET /api/v1/registrations
pub async fn search_registrations(
    State(state): State<AppState>,
    OptionalCurrentUser(user): OptionalCurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let is_admin = user.map_or(false, |u| u.role == UserRole::Admin);
    let status = match query.status {
        Some(RegistrationStatus::Active) | None => query.status,
        other if is_admin => other,
        _ => None,
    };

    let filters = SearchFilters {
        category: query.category,
        status,
        featured: query.featured,
    };

    let results = state
        .registrations
        .search(query.q.as_deref(), &filters, query.sort)
        .await?;
    Ok(Json(results))
}

/// Create a registration.
///
/// POST /api/v1/registrations
pub async fn create_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = state.registrations.create(&user, request).await?;
    record_registration_created();
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Fetch a single registration and record the view.
///
/// GET /api/v1/registrations/:id
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.get(id).await?;
    state.registrations.increment_view(id).await;
    Ok(Json(registration))
}

/// List the caller's own registrations, every status included.
///
/// GET /api/v1/registrations/mine
pub async fn list_my_registrations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let results = state.registrations.list_by_host(user.id).await?;
    Ok(Json(results))
}

/// Move a draft into the review queue.
///
/// POST /api/v1/registrations/:id/publish
pub async fn publish_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.submit_for_publishing(id, &user).await?;
    Ok(Json(registration))
}

/// Approve a pending registration.
///
/// POST /api/v1/registrations/:id/approve
pub async fn approve_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.approve(id, &user).await?;
    Ok(Json(registration))
}

/// Reject a pending registration.
///
/// POST /api/v1/registrations/:id/reject
pub async fn reject_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.reject(id, &user).await?;
    Ok(Json(registration))
}

/// Pause an active registration.
///
/// POST /api/v1/registrations/:id/pause
pub async fn pause_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.pause(id, &user).await?;
    Ok(Json(registration))
}

/// Resume a paused registration.
///
/// POST /api/v1/registrations/:id/resume
pub async fn resume_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.registrations.resume(id, &user).await?;
    Ok(Json(registration))
}

#[derive(Debug, Deserialize)]
pub struct SetFeaturedRequest {
    pub featured: bool,
}

/// Set the featured flag (admin only).
///
/// PUT /api/v1/registrations/:id/featured
pub async fn set_featured(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetFeaturedRequest>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state
        .registrations
        .set_featured(id, &user, request.featured)
        .await?;
    Ok(Json(registration))
}

/// Delete a registration and its submissions.
///
/// DELETE /api/v1/registrations/:id
pub async fn delete_registration(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.registrations.delete(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

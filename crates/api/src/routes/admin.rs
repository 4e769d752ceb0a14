//! Admin endpoint handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use validator::Validate;

use domain::models::category::UpsertCategoryRequest;
use domain::models::submission::SubmissionStatus;
use domain::models::user::{User, UserRole};
use domain::models::Category;
use domain::services::access;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

fn require_admin(user: &User) -> Result<(), ApiError> {
    if access::can_manage_users(user) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Admin privileges required".to_string(),
        ))
    }
}

/// List all accounts.
///
/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    require_admin(&user)?;
    let users = state.repos.users.list_all().await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// Change an account's role.
///
/// PUT /api/v1/admin/users/:id/role
pub async fn set_user_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<User>, ApiError> {
    require_admin(&user)?;

    let updated = state
        .repos
        .users
        .update_role(id, request.role)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    tracing::info!(user_id = %updated.id, role = %updated.role, "Role changed");
    Ok(Json(updated))
}

/// Create a category or replace an existing one by slug.
///
/// PUT /api/v1/admin/categories
pub async fn upsert_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpsertCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    require_admin(&user)?;
    request.validate()?;

    let category = Category {
        id: request.id,
        name: request.name,
        description: request.description,
        icon: request.icon,
        admin_only: request.admin_only,
        count: 0,
    };
    let saved = state.repos.categories.upsert(category).await?;
    tracing::info!(category_id = %saved.id, "Category saved");
    Ok(Json(saved))
}

/// Platform-wide statistics.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_registrations: usize,
    pub registrations_by_status: BTreeMap<String, usize>,
    pub total_submissions: usize,
    pub pending_submissions: usize,
}

/// Aggregate counts for the admin dashboard.
///
/// GET /api/v1/admin/stats
pub async fn get_admin_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AdminStats>, ApiError> {
    require_admin(&user)?;

    let users = state.repos.users.list_all().await?;
    let registrations = state.repos.registrations.list_all().await?;
    let submissions = state.repos.submissions.list_all().await?;

    let now = Utc::now();
    let mut registrations_by_status: BTreeMap<String, usize> = BTreeMap::new();
    for registration in &registrations {
        let status = registration.effective_status(now);
        *registrations_by_status
            .entry(status.as_str().to_string())
            .or_default() += 1;
    }

    let pending_submissions = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Pending)
        .count();

    Ok(Json(AdminStats {
        total_users: users.len(),
        total_registrations: registrations.len(),
        registrations_by_status,
        total_submissions: submissions.len(),
        pending_submissions,
    }))
}

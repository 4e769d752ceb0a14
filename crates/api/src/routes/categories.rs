//! Category endpoint handlers.

use axum::{extract::State, Json};
use chrono::Utc;

use domain::models::registration::{RegistrationStatus, Visibility};
use domain::models::{Category, UserRole};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalCurrentUser;

/// List categories with live counts of active registrations.
///
/// GET /api/v1/categories
///
/// Admin-only categories are hidden from everyone but admins. Counts
/// cover publicly discoverable active registrations and are computed
/// at read time rather than stored.
pub async fn list_categories(
    State(state): State<AppState>,
    OptionalCurrentUser(user): OptionalCurrentUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    let is_admin = user.map_or(false, |u| u.role == UserRole::Admin);

    let registrations = state.repos.registrations.list_all().await?;
    let now = Utc::now();

    let categories = state
        .repos
        .categories
        .list_all()
        .await?
        .into_iter()
        .filter(|c| is_admin || !c.admin_only)
        .map(|mut c| {
            c.count = registrations
                .iter()
                .filter(|r| {
                    r.category == c.id
                        && r.visibility == Visibility::Public
                        && r.effective_status(now) == RegistrationStatus::Active
                })
                .count() as i64;
            c
        })
        .collect();

    Ok(Json(categories))
}

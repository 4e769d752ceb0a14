//! Current-user endpoint handlers.

use axum::{extract::State, Json};

use domain::models::user::{User, UserRole};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Return the authenticated user's profile.
///
/// GET /api/v1/users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Upgrade an agent account to host.
///
/// POST /api/v1/users/me/become-host
///
/// Idempotent for accounts that already hold the host role. Admins are
/// left untouched so the upgrade can never demote.
pub async fn become_host(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<User>, ApiError> {
    if user.role != UserRole::Agent {
        return Ok(Json(user));
    }

    let updated = state
        .repos
        .users
        .update_role(user.id, UserRole::Host)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    tracing::info!(user_id = %updated.id, "Account upgraded to host");
    Ok(Json(updated))
}

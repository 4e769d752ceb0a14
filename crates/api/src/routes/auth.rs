//! Passwordless authentication handlers.
//!
//! Accounts are identified by email alone. Signup creates an agent
//! account; login issues a fresh token for an existing one. Both return
//! the same token-plus-profile payload.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::models::user::{SignupRequest, User};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn auth_response(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let token = state
        .jwt
        .generate_token(user.id, user.role.as_str())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(AuthResponse { token, user })
}

/// Create an account.
///
/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let user = User::new(
        request.email.trim().to_lowercase(),
        request.name.trim().to_string(),
        request.phone,
    );
    let user = state.repos.users.create(user).await?;

    tracing::info!(user_id = %user.id, "Account created");
    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

/// Issue a token for an existing account.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let user = state
        .repos
        .users
        .find_by_email(request.email.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("No account for that email".to_string()))?;

    Ok(Json(auth_response(&state, user)?))
}

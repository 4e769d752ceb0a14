//! Authenticated user extractor.
//!
//! Validates the Bearer token in the Authorization header and loads the
//! account it names. Handlers receive the full user record, so role
//! checks always see the current role rather than the one captured in
//! the token.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

async fn authenticate(parts: &Parts, state: &AppState) -> Result<User, ApiError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))?;

    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    state
        .repos
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown account".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(CurrentUser)
    }
}

/// Optional authentication.
///
/// Lets public routes attribute the request to an account when a valid
/// token is supplied, without rejecting anonymous callers.
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalCurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalCurrentUser(authenticate(parts, state).await.ok()))
    }
}

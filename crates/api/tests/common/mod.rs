//! Common test utilities for integration tests.
//!
//! Tests run against the in-memory backend with seeded demo data, so no
//! external services are required.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use serde_json::Value;

use domain::models::User;
use domain::repository::UserRepository;
use persistence::memory::{seed, MemoryBackend};
use regos_api::app::{create_app, Repositories};
use regos_api::config::Config;
use shared::jwt::JwtConfig;

pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

/// Builds an app over a fresh seeded in-memory backend.
///
/// Returns the backend too so tests can inspect or mutate state behind
/// the API's back.
pub fn create_test_app() -> (Router, MemoryBackend) {
    let config = Config::load_for_test(&[]).expect("Failed to load test config");
    let backend = MemoryBackend::seeded();
    let app = create_app(config, Repositories::memory(backend.clone()), None);
    (app, backend)
}

/// Looks up a seeded fixture account by email.
pub async fn fixture_user(backend: &MemoryBackend, email: &str) -> User {
    backend
        .find_by_email(email)
        .await
        .expect("backend read failed")
        .expect("fixture account missing")
}

pub async fn admin_user(backend: &MemoryBackend) -> User {
    fixture_user(backend, seed::ADMIN_EMAIL).await
}

pub async fn host_user(backend: &MemoryBackend) -> User {
    fixture_user(backend, seed::HOST_EMAIL).await
}

pub async fn agent_user(backend: &MemoryBackend) -> User {
    fixture_user(backend, seed::AGENT_EMAIL).await
}

/// Issues a token the way the auth routes do.
pub fn token_for(user: &User) -> String {
    JwtConfig::new(TEST_JWT_SECRET, 3600)
        .generate_token(user.id, user.role.as_str())
        .expect("token generation failed")
}

/// Builds a JSON request without authentication.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Builds a JSON request with a Bearer token.
pub fn authed_json_request(method: Method, uri: &str, user: &User, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Builds a bodyless request with a Bearer token.
pub fn authed_request(method: Method, uri: &str, user: &User) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)))
        .body(Body::empty())
        .unwrap()
}

/// Parses a JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// A complete registration payload accepted by POST /api/v1/registrations.
pub fn registration_payload() -> Value {
    serde_json::json!({
        "title": "Startup Pitch Night",
        "description": "Monthly pitch event for early-stage founders",
        "category": "events",
        "visibility": "public",
        "duration": "7days",
        "form_schema": [
            {
                "id": "name",
                "type": "text",
                "label": "Full Name",
                "required": true
            },
            {
                "id": "email",
                "type": "email",
                "label": "Email Address",
                "required": true
            }
        ]
    })
}

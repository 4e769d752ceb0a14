//! Integration tests for authentication and account endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_user, agent_user, authed_request, create_test_app, json_request, parse_response_body,
};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_signup_creates_agent_account() {
    let (app, _backend) = create_test_app();

    let request = json_request(
        Method::POST,
        "/api/v1/auth/signup",
        json!({
            "email": "New.Person@Example.com",
            "name": "New Person"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "new.person@example.com");
    assert_eq!(body["user"]["role"], "agent");
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let (app, _backend) = create_test_app();

    let email: String = SafeEmail().fake();
    let payload = json!({ "email": email, "name": "Dup" });

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/auth/signup", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(Method::POST, "/api/v1/auth/signup", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_invalid_email_rejected() {
    let (app, _backend) = create_test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/signup",
            json!({ "email": "not-an-email", "name": "X" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token_for_known_email() {
    let (app, _backend) = create_test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "email": "host@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["user"]["role"], "host");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let (app, _backend) = create_test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/auth/login",
            json!({ "email": "nobody@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let (app, _backend) = create_test_app();

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/users/me")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;

    let response = app
        .oneshot(authed_request(Method::GET, "/api/v1/users/me", &admin))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], admin.id.to_string());
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_become_host_upgrades_agent() {
    let (app, backend) = create_test_app();
    let agent = agent_user(&backend).await;

    let response = app
        .oneshot(authed_request(
            Method::POST,
            "/api/v1/users/me/become-host",
            &agent,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["role"], "host");
}

#[tokio::test]
async fn test_become_host_leaves_admin_untouched() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;

    let response = app
        .oneshot(authed_request(
            Method::POST,
            "/api/v1/users/me/become-host",
            &admin,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_admin_can_change_roles() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;
    let agent = agent_user(&backend).await;

    let response = app
        .oneshot(common::authed_json_request(
            Method::PUT,
            &format!("/api/v1/admin/users/{}/role", agent.id),
            &admin,
            json!({ "role": "host" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["role"], "host");
}

#[tokio::test]
async fn test_non_admin_cannot_change_roles() {
    let (app, backend) = create_test_app();
    let host = common::host_user(&backend).await;
    let agent = agent_user(&backend).await;

    let response = app
        .oneshot(common::authed_json_request(
            Method::PUT,
            &format!("/api/v1/admin/users/{}/role", agent.id),
            &host,
            json!({ "role": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_request_id_echoed_and_generated() {
    let (app, _backend) = create_test_app();

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header("X-Request-ID", "trace-me-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let generated = response.headers().get("x-request-id").unwrap();
    assert!(!generated.to_str().unwrap().is_empty());
}

//! Integration tests for submission endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_user, agent_user, authed_json_request, authed_request, create_test_app, host_user,
    json_request, parse_response_body, registration_payload,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Creates and approves a registration, returning its id.
async fn active_registration_id(
    app: &axum::Router,
    backend: &persistence::memory::MemoryBackend,
) -> String {
    let host = host_user(backend).await;
    let admin = admin_user(backend).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v1/registrations",
            &host,
            registration_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/approve", id),
            &admin,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    id
}

fn submission_payload() -> Value {
    json!({
        "form_data": {
            "name": "Jane Applicant",
            "email": "jane@example.com"
        },
        "files": []
    })
}

#[tokio::test]
async fn test_anonymous_submission_accepted() {
    let (app, backend) = create_test_app();
    let id = active_registration_id(&app, &backend).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "pending");
    assert!(body["user_id"].is_null());

    // Counter reflected on the registration.
    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/registrations/{}", id),
            Value::Null,
        ))
        .await
        .unwrap();
    let registration = parse_response_body(response).await;
    assert_eq!(registration["submission_count"], 1);
}

#[tokio::test]
async fn test_authenticated_submission_attributed() {
    let (app, backend) = create_test_app();
    let agent = agent_user(&backend).await;
    let id = active_registration_id(&app, &backend).await;

    let response = app
        .oneshot(authed_json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            &agent,
            submission_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["user_id"], agent.id.to_string());
}

#[tokio::test]
async fn test_missing_required_field_is_bad_request() {
    let (app, backend) = create_test_app();
    let id = active_registration_id(&app, &backend).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            json!({ "form_data": { "name": "Jane" }, "files": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Email Address"));
}

#[tokio::test]
async fn test_submission_to_unapproved_registration_is_gone() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v1/registrations",
            &host,
            registration_payload(),
        ))
        .await
        .unwrap();
    let id = parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GONE);
}

#[tokio::test]
async fn test_list_submissions_owner_only() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let agent = agent_user(&backend).await;
    let id = active_registration_id(&app, &backend).await;

    app.clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::GET,
            &format!("/api/v1/registrations/{}/submissions", id),
            &agent,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(authed_request(
            Method::GET,
            &format!("/api/v1/registrations/{}/submissions", id),
            &host,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_review_submission() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let id = active_registration_id(&app, &backend).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();
    let submission_id = parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v1/submissions/{}/status", submission_id),
            &host,
            json!({ "status": "approved", "notes": "Welcome aboard" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(body["notes"], "Welcome aboard");

    // Setting back to pending is not a review outcome.
    let response = app
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v1/submissions/{}/status", submission_id),
            &host,
            json!({ "status": "pending" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_submission_updates_counter() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let id = active_registration_id(&app, &backend).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();
    let submission_id = parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::DELETE,
            &format!("/api/v1/submissions/{}", submission_id),
            &host,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/registrations/{}", id),
            Value::Null,
        ))
        .await
        .unwrap();
    let registration = parse_response_body(response).await;
    assert_eq!(registration["submission_count"], 0);
}

#[tokio::test]
async fn test_admin_stats() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;
    let id = active_registration_id(&app, &backend).await;

    app.clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/submissions", id),
            submission_payload(),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(authed_request(Method::GET, "/api/v1/admin/stats", &admin))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["total_users"], 3);
    assert!(body["total_registrations"].as_u64().unwrap() >= 3);
    assert!(body["registrations_by_status"]["active"].as_u64().unwrap() >= 3);
    assert_eq!(body["pending_submissions"], 1);
}

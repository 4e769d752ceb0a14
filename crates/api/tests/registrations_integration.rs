//! Integration tests for registration endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_user, agent_user, authed_json_request, authed_request, create_test_app, host_user,
    json_request, parse_response_body, registration_payload,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn create_registration(app: &axum::Router, user: &domain::models::User) -> Value {
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v1/registrations",
            user,
            registration_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_response_body(response).await
}

#[tokio::test]
async fn test_create_registration_as_host() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;

    let body = create_registration(&app, &host).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["duration"], "7days");
    assert_eq!(body["submission_count"], 0);
    assert_eq!(body["host_name"], host.name);
}

#[tokio::test]
async fn test_create_registration_as_agent_forbidden() {
    let (app, backend) = create_test_app();
    let agent = agent_user(&backend).await;

    let response = app
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v1/registrations",
            &agent,
            registration_payload(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_registration_unknown_category_bad_request() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;

    let mut payload = registration_payload();
    payload["category"] = json!("no-such-category");

    let response = app
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v1/registrations",
            &host,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_flow() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let admin = admin_user(&backend).await;

    let created = create_registration(&app, &host).await;
    let id = created["id"].as_str().unwrap();

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
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["verified"], true);

    // Second approve conflicts.
    let response = app
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/approve", id),
            &admin,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_foreign_host_cannot_approve() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let admin = admin_user(&backend).await;
    let agent = agent_user(&backend).await;

    let created = create_registration(&app, &host).await;
    let id = created["id"].as_str().unwrap();

    // Promote the agent to host; they still don't own the registration.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v1/admin/users/{}/role", agent.id),
            &admin,
            json!({ "role": "host" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/approve", id),
            &agent,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pause_and_resume() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let admin = admin_user(&backend).await;

    let created = create_registration(&app, &host).await;
    let id = created["id"].as_str().unwrap();

    app.clone()
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/approve", id),
            &admin,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/pause", id),
            &host,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "paused");

    let response = app
        .oneshot(authed_request(
            Method::POST,
            &format!("/api/v1/registrations/{}/resume", id),
            &host,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "active");
}

#[tokio::test]
async fn test_get_registration_public_and_counts_views() {
    let (app, _backend) = create_test_app();

    // Seeded data includes active registrations; find one via search.
    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/api/v1/registrations", Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = parse_response_body(response).await;
    let id = results[0]["id"].as_str().unwrap().to_string();

    let initial_views = results[0]["view_count"].as_i64().unwrap();

    // Two unauthenticated reads.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::GET,
                &format!("/api/v1/registrations/{}", id),
                Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/registrations/{}", id),
            Value::Null,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["view_count"].as_i64().unwrap(), initial_views + 2);
}

#[tokio::test]
async fn test_search_with_query_and_sort() {
    let (app, _backend) = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::GET,
            "/api/v1/registrations?q=summit&sort=ending",
            Value::Null,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = parse_response_body(response).await;
    assert!(results.as_array().unwrap().iter().all(|r| {
        r["title"].as_str().unwrap().to_lowercase().contains("summit")
    }));

    // A term matching nothing empties the result.
    let response = app
        .oneshot(json_request(
            Method::GET,
            "/api/v1/registrations?q=summit%20zeppelin",
            Value::Null,
        ))
        .await
        .unwrap();
    let results = parse_response_body(response).await;
    assert_eq!(results.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_status_filter_is_admin_only() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let admin = admin_user(&backend).await;

    let created = create_registration(&app, &host).await;

    // Anonymous callers cannot enumerate pending listings; the filter
    // falls back to active.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::GET,
            "/api/v1/registrations?status=pending",
            Value::Null,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = parse_response_body(response).await;
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["status"] == "active"));

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::GET,
            "/api/v1/registrations?status=pending",
            &host,
        ))
        .await
        .unwrap();
    let results = parse_response_body(response).await;
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"] != created["id"]));

    let response = app
        .oneshot(authed_request(
            Method::GET,
            "/api/v1/registrations?status=pending",
            &admin,
        ))
        .await
        .unwrap();
    let results = parse_response_body(response).await;
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == created["id"]));
}

#[tokio::test]
async fn test_list_mine_includes_pending() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;

    create_registration(&app, &host).await;

    let response = app
        .oneshot(authed_request(Method::GET, "/api/v1/registrations/mine", &host))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let results = parse_response_body(response).await;
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["status"] == "pending"));
}

#[tokio::test]
async fn test_set_featured_admin_only() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;
    let admin = admin_user(&backend).await;

    let created = create_registration(&app, &host).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v1/registrations/{}/featured", id),
            &host,
            json!({ "featured": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v1/registrations/{}/featured", id),
            &admin,
            json!({ "featured": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["featured"], true);
}

#[tokio::test]
async fn test_delete_registration() {
    let (app, backend) = create_test_app();
    let host = host_user(&backend).await;

    let created = create_registration(&app, &host).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::DELETE,
            &format!("/api/v1/registrations/{}", id),
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
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_hide_admin_only_and_report_counts() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/api/v1/categories", Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let anonymous = parse_response_body(response).await;
    assert!(anonymous
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["id"] != "platform"));

    let response = app
        .oneshot(authed_request(Method::GET, "/api/v1/categories", &admin))
        .await
        .unwrap();
    let as_admin = parse_response_body(response).await;
    assert!(as_admin
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"] == "platform"));

    // Seeded events category has one active registration.
    let events = as_admin
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "events")
        .unwrap();
    assert!(events["count"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn test_admin_can_upsert_category() {
    let (app, backend) = create_test_app();
    let admin = admin_user(&backend).await;
    let host = host_user(&backend).await;

    let payload = json!({
        "id": "vehicle-registry",
        "name": "Vehicle Registry",
        "description": "VIN and vehicle registrations",
        "icon": "Car"
    });

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            "/api/v1/admin/categories",
            &host,
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            "/api/v1/admin/categories",
            &admin,
            json!({
                "id": "Not A Slug",
                "name": "Broken",
                "description": "",
                "icon": "X"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            "/api/v1/admin/categories",
            &admin,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = parse_response_body(response).await;
    assert_eq!(created["id"], "vehicle-registry");

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/categories", Value::Null))
        .await
        .unwrap();
    let listed = parse_response_body(response).await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"] == "vehicle-registry"));
}

#[tokio::test]
async fn test_pricing_endpoint() {
    let (app, _backend) = create_test_app();

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/pricing", Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["publish"]["7days"], 199);
    assert_eq!(body["extend"]["1day"], 39);
    assert_eq!(body["pause"], 29);
    // Extension past 7 days is not offered.
    assert!(body["extend"].get("30days").is_none());
}

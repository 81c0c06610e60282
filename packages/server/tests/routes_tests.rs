//! HTTP surface tests: routing, actor extraction, and error mapping,
//! exercised with `tower::ServiceExt::oneshot` against the in-memory
//! dependencies.

mod common;

use common::*;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::common::auth::{Actor, Role};
use server_core::common::UserId;
use server_core::domains::pets::models::PetStatus;
use server_core::server::build_app;

fn test_app() -> (Router, TestDependencies) {
    let t = TestDependencies::new();
    let app = build_app(t.deps.clone(), None, Vec::new());
    (app, t)
}

fn request(method: &str, uri: &str, actor: Option<&Actor>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(Actor::Visitor { id, role }) = actor {
        builder = builder
            .header("x-actor-id", id.to_string())
            .header("x-actor-role", role.to_string());
    }
    match body {
        Some(value) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_open() {
    let (app, _t) = test_app();
    let response = app.oneshot(request("GET", "/health", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mutations_require_actor_headers() {
    let (app, _t) = test_app();
    let response = app
        .oneshot(request(
            "POST",
            "/pets",
            None,
            Some(json!({"name": "Mochi", "species": "cat"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = json_body(response).await;
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_malformed_actor_headers_are_rejected() {
    let (app, _t) = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/pets")
        .header("x-actor-id", "not-a-uuid")
        .header("x-actor-role", "ADMIN")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"name": "Mochi", "species": "cat"}).to_string()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pet_crud_and_transition_over_http() {
    let (app, _t) = test_app();
    let owner = user();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/pets",
            Some(&owner),
            Some(json!({"name": "Biscuit", "species": "dog"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let pet = json_body(response).await;
    assert_eq!(pet["status"], "AVAILABLE");
    let pet_id = pet["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/pets/{pet_id}"), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/pets/{pet_id}/status"),
            Some(&owner),
            Some(json!({"target": "PENDING"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let pet = json_body(response).await;
    assert_eq!(pet["status"], "PENDING");

    // Absent edge maps to 422.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/pets/{pet_id}/status"),
            Some(&owner),
            Some(json!({"target": "IN_CUSTODY"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_transition");
}

#[tokio::test]
async fn test_admin_gated_edge_maps_to_403_over_http() {
    let (app, t) = test_app();
    let pet = seed_pet(&t, PetStatus::Adopted).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/pets/{}/status", pet.id),
            Some(&user()),
            Some(json!({"target": "AVAILABLE"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            "POST",
            &format!("/pets/{}/status", pet.id),
            Some(&admin()),
            Some(json!({"target": "AVAILABLE"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_pet_maps_to_404() {
    let (app, _t) = test_app();
    let response = app
        .oneshot(request(
            "GET",
            &format!("/pets/{}", uuid::Uuid::now_v7()),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_transition_listing_route() {
    let (app, t) = test_app();
    let pet = seed_pet(&t, PetStatus::Available).await;

    let response = app
        .oneshot(request(
            "GET",
            &format!("/pets/{}/transitions", pet.id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let info = json_body(response).await;
    assert_eq!(info["current_status"], "AVAILABLE");
    assert_eq!(info["allowed_targets"], json!(["PENDING", "IN_CUSTODY"]));
}

#[tokio::test]
async fn test_audit_trail_route_is_admin_gated() {
    let (app, t) = test_app();
    let pet = seed_pet(&t, PetStatus::Available).await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/pets/{}/status", pet.id),
            Some(&user()),
            Some(json!({"target": "PENDING"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/pets/{}/events", pet.id), Some(&user()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request("GET", &format!("/pets/{}/events", pet.id), Some(&admin()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rows = json_body(response).await;
    assert_eq!(rows[0]["event_type"], "pet.status_changed");
}

#[tokio::test]
async fn test_user_registration_role_grants_are_admin_gated() {
    let (app, _t) = test_app();

    // Open self-registration, no headers needed.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users",
            None,
            Some(json!({"display_name": "sam"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users",
            Some(&user()),
            Some(json!({"display_name": "eve", "role": "ADMIN"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            "POST",
            "/users",
            Some(&admin()),
            Some(json!({"display_name": "staff", "role": "SHELTER"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_adoption_workflow_over_http() {
    let (app, t) = test_app();
    let pet = seed_pet(&t, PetStatus::Available).await;
    let adopter = Actor::visitor(UserId::new(), Role::User);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/adoptions",
            Some(&adopter),
            Some(json!({"pet_id": pet.id, "escrow_amount": "150.00"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let adoption = json_body(response).await;
    let adoption_id = adoption["id"].as_str().unwrap().to_string();
    let escrow_id = adoption["escrow_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/adoptions/{adoption_id}/approve"),
            Some(&admin()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Escrow still pending: completion conflicts.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/adoptions/{adoption_id}/complete"),
            Some(&admin()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/escrows/{escrow_id}/fund"),
            Some(&adopter),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/escrows/{escrow_id}/release"),
            Some(&admin()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request(
            "POST",
            &format!("/adoptions/{adoption_id}/complete"),
            Some(&admin()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let adoption = json_body(response).await;
    assert_eq!(adoption["status"], "COMPLETED");
}

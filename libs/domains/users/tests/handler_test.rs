//! Handler tests for Users domain
//!
//! Drive the users router directly (no `/api` prefix, no middleware) to check
//! request parsing, status codes and JSON bodies.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn alice() -> Value {
    json!({
        "username": "alice",
        "email": "a@x.com",
        "first_name": "A",
        "last_name": "B",
        "password": "secret1"
    })
}

async fn create(app: &Router, body: Value) -> UserResponse {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_user_returns_201_without_password() {
    let response = app()
        .oneshot(json_request("POST", "/", alice()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["status"], "ACTIVE");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_duplicate_username_returns_409() {
    let app = app();
    create(&app, alice()).await;

    let response = app
        .oneshot(json_request("POST", "/", alice()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "User with username 'alice' already exists");
}

#[tokio::test]
async fn test_create_user_validates_input() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "username": " ",
                "email": "a@x.com",
                "first_name": "A",
                "last_name": "B",
                "password": "12345"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["username"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_get_update_delete_lifecycle() {
    let app = app();
    let created = create(&app, alice()).await;
    let uri = format!("/{}", created.id);

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({
                "username": "alice",
                "email": "alice@x.com",
                "first_name": "Alicia",
                "last_name": "B",
                "password": "",
                "status": "SUSPENDED"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = json_body(response.into_body()).await;
    assert_eq!(updated.email, "alice@x.com");
    assert_eq!(updated.status, UserStatus::Suspended);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_uuid_returns_400() {
    let response = app().oneshot(get("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_lookup_routes() {
    let app = app();
    create(&app, alice()).await;
    create(
        &app,
        json!({
            "username": "bob_wilson",
            "email": "bob.wilson@example.com",
            "first_name": "Bob",
            "last_name": "Wilson",
            "password": "password123",
            "status": "INACTIVE"
        }),
    )
    .await;

    let response = app.clone().oneshot(get("/username/alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/username/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/email/bob.wilson@example.com"))
        .await
        .unwrap();
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.username, "bob_wilson");

    let response = app.clone().oneshot(get("/active")).await.unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);

    let response = app.clone().oneshot(get("/status/inactive")).await.unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users[0].username, "bob_wilson");

    let response = app.clone().oneshot(get("/status/SLEEPING")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/search/firstname?first_name=BO"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);

    let response = app
        .clone()
        .oneshot(get("/search/lastname?last_name=WIL"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);

    let response = app
        .clone()
        .oneshot(get("/email-domain/example.com"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);

    let response = app
        .clone()
        .oneshot(get("/created-after?date=2000-01-01T00:00:00"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 2);

    let response = app.oneshot(get("/")).await.unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users[0].username, "alice");
}

#[tokio::test]
async fn test_missing_query_parameter_returns_400() {
    let response = app().oneshot(get("/search/firstname")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_bad_date_returns_400() {
    let response = app()
        .oneshot(get("/created-after?date=last-tuesday"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_camel_case_field_names_are_accepted() {
    let app = app();
    let created = create(
        &app,
        json!({
            "username": "bob",
            "email": "bob@x.com",
            "firstName": "Bob",
            "lastName": "Wilson",
            "password": "secret1"
        }),
    )
    .await;
    assert_eq!(created.first_name, "Bob");
    assert_eq!(created.last_name, "Wilson");

    let response = app
        .clone()
        .oneshot(get("/search/firstname?firstName=bo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(found.len(), 1);

    let response = app
        .oneshot(get("/search/lastname?lastName=WIL"))
        .await
        .unwrap();
    let found: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(found.len(), 1);
}

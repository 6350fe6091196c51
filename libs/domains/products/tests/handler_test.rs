//! Handler tests for Products domain
//!
//! Drive the products router directly (no `/api` prefix, no middleware).

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn list(app: &Router, uri: &str) -> Vec<Product> {
    let response = app.clone().oneshot(request("GET", uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    json_body(response.into_body()).await
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

/// Small catalog covering every query
async fn seeded() -> Router {
    let app = app();
    for body in [
        json!({ "name": "Laptop", "price": "1299.99", "stock_quantity": 15, "category": "ELECTRONICS" }),
        json!({ "name": "Headphones", "price": "199.99", "stock_quantity": 5, "category": "ELECTRONICS" }),
        json!({ "name": "Gaming Laptop", "price": "1299.99", "stock_quantity": 0, "category": "ELECTRONICS" }),
        json!({ "name": "Novel", "price": "14.99", "stock_quantity": 3, "category": "BOOKS", "status": "DISCONTINUED" }),
        json!({ "name": "Yoga Mat", "price": "29.99", "stock_quantity": 40, "category": "SPORTS" }),
    ] {
        create(&app, body).await;
    }
    app
}

#[tokio::test]
async fn test_create_widget_with_zero_stock() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Widget", "price": 9.99, "stock_quantity": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "OUT_OF_STOCK");
    assert_eq!(body["category"], "OTHER");
    assert_eq!(body["price"], "9.99");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_validation_errors() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "  ", "price": "0", "stock_quantity": -1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["price"].is_array());
    assert!(body["details"]["stock_quantity"].is_array());
}

#[tokio::test]
async fn test_get_update_delete_lifecycle() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "Lamp", "price": "25.00", "stock_quantity": 8, "category": "HOME" }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({
                "name": "Desk Lamp",
                "price": "27.50",
                "stock_quantity": 0,
                "category": "HOME",
                "status": "AVAILABLE"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Desk Lamp");
    assert_eq!(updated.status, ProductStatus::OutOfStock);
    assert_eq!(updated.created_at, created.created_at);

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_uuid_returns_400() {
    let response = app()
        .oneshot(request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_patch_stock_transitions() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "Mug", "price": "8.00", "stock_quantity": 0 }),
    )
    .await;
    assert_eq!(created.status, ProductStatus::OutOfStock);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/{}/stock?stock_quantity=5", created.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let restocked: Product = json_body(response.into_body()).await;
    assert_eq!(restocked.status, ProductStatus::Available);
    assert_eq!(restocked.stock_quantity, 5);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/{}/stock?stock_quantity=lots", created.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_patch_stock_unknown_product() {
    let response = app()
        .oneshot(request(
            "PATCH",
            &format!("/{}/stock?stock_quantity=5", uuid::Uuid::nil()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_and_status_queries() {
    let app = seeded().await;

    assert_eq!(
        names(&list(&app, "/category/electronics").await),
        vec!["Laptop", "Headphones", "Gaming Laptop"]
    );
    assert_eq!(
        names(&list(&app, "/status/OUT_OF_STOCK").await),
        vec!["Gaming Laptop"]
    );
    assert_eq!(
        names(&list(&app, "/available").await),
        vec!["Laptop", "Headphones", "Yoga Mat"]
    );
    assert_eq!(
        names(&list(&app, "/available/category/ELECTRONICS").await),
        vec!["Laptop", "Headphones"]
    );

    let response = app
        .clone()
        .oneshot(request("GET", "/category/GARDEN"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = seeded().await;

    assert_eq!(
        names(&list(&app, "/search?name=LAPTOP").await),
        vec!["Laptop", "Gaming Laptop"]
    );

    let response = app.oneshot(request("GET", "/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_price_queries() {
    let app = seeded().await;

    assert_eq!(
        names(&list(&app, "/price/max/29.99").await),
        vec!["Novel", "Yoga Mat"]
    );
    assert_eq!(list(&app, "/price/min/199.99").await.len(), 3);
    assert_eq!(
        names(&list(&app, "/price/range?min_price=20&max_price=200").await),
        vec!["Headphones", "Yoga Mat"]
    );
    assert_eq!(
        names(
            &list(
                &app,
                "/price/range/category/ELECTRONICS?min_price=100&max_price=500"
            )
            .await
        ),
        vec!["Headphones"]
    );

    let response = app
        .clone()
        .oneshot(request("GET", "/price/max/cheap"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request("GET", "/price/range?min_price=abc&max_price=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_low_stock_most_expensive_and_recent() {
    let app = seeded().await;

    // Novel is low on stock but discontinued
    assert_eq!(names(&list(&app, "/low-stock").await), vec!["Headphones"]);
    assert_eq!(
        names(&list(&app, "/most-expensive").await),
        vec!["Laptop", "Gaming Laptop"]
    );
    assert_eq!(list(&app, "/recent").await.len(), 5);
}

#[tokio::test]
async fn test_list_empty_catalog() {
    assert!(list(&app(), "/").await.is_empty());
    assert!(list(&app(), "/most-expensive").await.is_empty());
}

#[tokio::test]
async fn test_camel_case_field_names_are_accepted() {
    let app = seeded().await;

    let created = create(
        &app,
        json!({ "name": "Kettle", "price": "39.99", "stockQuantity": 0, "category": "HOME" }),
    )
    .await;
    assert_eq!(created.stock_quantity, 0);
    assert_eq!(created.status, ProductStatus::OutOfStock);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/{}/stock?stockQuantity=12", created.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let restocked: Product = json_body(response.into_body()).await;
    assert_eq!(restocked.stock_quantity, 12);
    assert_eq!(restocked.status, ProductStatus::Available);

    assert_eq!(
        names(&list(&app, "/price/range?minPrice=20&maxPrice=200").await),
        vec!["Headphones", "Yoga Mat", "Kettle"]
    );
}

//! HTTP surface tests using the router directly.

use std::sync::Arc;

use askql::config::ServerConfig;
use askql::{create_rest_router, MemoryDatabase, QueryExecutor, Row};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn rows(value: Value) -> Vec<Row> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

fn router_with(university: MemoryDatabase, sales: MemoryDatabase) -> Router {
    let executor = QueryExecutor::new(Arc::new(university), Arc::new(sales));
    create_rest_router(Arc::new(executor), &ServerConfig::default())
}

fn router() -> Router {
    router_with(
        MemoryDatabase::new(
            "University",
            rows(json!([
                {"department": "CSE", "total_sales": 1520.0},
                {"department": "ECE", "total_sales": 310.25}
            ])),
        ),
        MemoryDatabase::new(
            "Sales",
            rows(json!([{"product": "Camera"}, {"product": "Laptop"}])),
        ),
    )
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--XyZ\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str("--XyZ--\r\n");

    Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XyZ")
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ask_department_sales() {
    let (status, body) = send(router(), ask_request("question=Show+department+sales")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"data": [
            {"department": "CSE", "total_sales": 1520.0},
            {"department": "ECE", "total_sales": 310.25}
        ]})
    );
}

#[tokio::test]
async fn test_ask_preserves_column_order() {
    let router = router_with(
        MemoryDatabase::new(
            "University",
            rows(json!([{"name": "Asha", "department": "CSE", "year": 2}])),
        ),
        MemoryDatabase::new("Sales", Vec::new()),
    );

    let response = router
        .oneshot(ask_request("question=students%20in%20cse"))
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"data":[{"name":"Asha","department":"CSE","year":2}]}"#
    );
}

#[tokio::test]
async fn test_ask_empty_result() {
    let router = router_with(
        MemoryDatabase::new("University", Vec::new()),
        MemoryDatabase::new("Sales", Vec::new()),
    );

    let (status, body) = send(router, ask_request("question=list+products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));
}

#[tokio::test]
async fn test_ask_missing_question() {
    for body in ["", "question=", "question=+++", "other=1"] {
        let (status, json) = send(router(), ask_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json, json!({"error": "Question is required."}));
    }
}

#[tokio::test]
async fn test_ask_multipart_form() {
    let request = multipart_request(&[("source", "browser"), ("question", "all products")]);

    let (status, body) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [{"product": "Camera"}, {"product": "Laptop"}]}));
}

#[tokio::test]
async fn test_ask_multipart_without_question() {
    for fields in [&[][..], &[("other", "1")][..], &[("question", "   ")][..]] {
        let (status, body) = send(router(), multipart_request(fields)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "fields {fields:?}");
        assert_eq!(body, json!({"error": "Question is required."}));
    }
}

#[tokio::test]
async fn test_ask_wrong_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"question": "all products"}"#))
        .unwrap();

    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Question is required."}));
}

#[tokio::test]
async fn test_ask_not_understood() {
    let (status, body) = send(router(), ask_request("question=how+is+the+weather")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "I could not understand the question."}));
}

#[tokio::test]
async fn test_ask_database_failure() {
    let router = router_with(
        MemoryDatabase::failing("University", "Unknown database 'University'"),
        MemoryDatabase::new("Sales", Vec::new()),
    );

    let (status, body) = send(router, ask_request("question=show+students")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Internal server error."));
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("Unknown database 'University'"));
    assert!(!details.starts_with("Database error"));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_index_page() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/ask"));
}

#[tokio::test]
async fn test_ask_rejects_get() {
    let request = Request::builder().uri("/ask").body(Body::empty()).unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

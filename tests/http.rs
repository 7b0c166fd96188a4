//! HTTP tests — status codes and bodies through the axum router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use kyobo_catalog::infra::memory_store::MemoryCatalog;
use kyobo_catalog::interface::http::router;

fn app() -> Router {
    router(Arc::new(MemoryCatalog::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn author_json() -> Value {
    json!({
        "name": "John Doe",
        "age": 30,
        "description": "some description",
        "image": "author-image.jpeg"
    })
}

fn book_json(author_id: Value) -> Value {
    json!({
        "isbn": "987-654",
        "title": "Test Book Title",
        "description": "Test Description",
        "image": "book-image.jpeg",
        "author": { "id": author_id, "name": "John Doe", "image": "author-image.jpeg" }
    })
}

// =============================================================================
// /v1/authors
// =============================================================================

#[tokio::test]
async fn health_reports_running() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn create_author_returns_201_with_id() {
    let app = app();
    let (status, body) = send(&app, "POST", "/v1/authors", Some(author_json())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Doe");
}

#[tokio::test]
async fn create_author_with_id_returns_400() {
    let app = app();
    let mut author = author_json();
    author["id"] = json!(999);

    let (status, body) = send(&app, "POST", "/v1/authors", Some(author)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already has an id"));
}

#[tokio::test]
async fn read_authors() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;

    let (status, body) = send(&app, "GET", "/v1/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "John Doe");

    let (status, body) = send(&app, "GET", "/v1/authors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 30);

    let (status, _) = send(&app, "GET", "/v1/authors/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_update_author() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;

    let mut replacement = author_json();
    replacement["name"] = json!("Don Joe");
    replacement["id"] = json!(77);

    let (status, body) = send(&app, "PUT", "/v1/authors/1", Some(replacement.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Don Joe");

    let (status, _) = send(&app, "PUT", "/v1/authors/999", Some(replacement)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_author() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;

    let (status, body) = send(&app, "PATCH", "/v1/authors/1", Some(json!({ "age": 65 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 65);
    assert_eq!(body["name"], "John Doe");

    let (status, _) = send(&app, "PATCH", "/v1/authors/999", Some(json!({ "age": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_author_returns_204_even_when_missing() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;

    let (status, _) = send(&app, "DELETE", "/v1/authors/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/v1/authors/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/v1/authors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// /v1/books
// =============================================================================

#[tokio::test]
async fn put_book_creates_then_updates() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;

    let (status, body) = send(&app, "PUT", "/v1/books/987-654", Some(book_json(json!(1)))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isbn"], "987-654");
    assert_eq!(body["author"]["id"], 1);
    assert!(body["author"].get("age").is_none());

    let mut changed = book_json(json!(1));
    changed["title"] = json!("Changed");
    let (status, body) = send(&app, "PUT", "/v1/books/987-654", Some(changed)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Changed");
}

#[tokio::test]
async fn put_book_with_unresolvable_author_returns_400() {
    let app = app();

    let (status, _) = send(&app, "PUT", "/v1/books/987-654", Some(book_json(json!(1)))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/v1/books/987-654", Some(book_json(Value::Null))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/v1/books/987-654", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_books_with_author_filter() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;
    send(&app, "POST", "/v1/authors", Some(author_json())).await;
    send(&app, "PUT", "/v1/books/111", Some(book_json(json!(1)))).await;
    send(&app, "PUT", "/v1/books/222", Some(book_json(json!(2)))).await;

    let (status, body) = send(&app, "GET", "/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/v1/books?author=2", None).await;
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["isbn"], "222");

    let (_, body) = send(&app, "GET", "/v1/books?author=999", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn patch_book() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;
    send(&app, "PUT", "/v1/books/987-654", Some(book_json(json!(1)))).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/v1/books/987-654",
        Some(json!({ "description": "Only description" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Test Book Title");
    assert_eq!(body["description"], "Only description");
    assert_eq!(body["image"], "book-image.jpeg");

    let (status, _) = send(&app, "PATCH", "/v1/books/nope", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_book_and_cascade_from_author() {
    let app = app();
    send(&app, "POST", "/v1/authors", Some(author_json())).await;
    send(&app, "PUT", "/v1/books/111", Some(book_json(json!(1)))).await;
    send(&app, "PUT", "/v1/books/222", Some(book_json(json!(1)))).await;

    let (status, _) = send(&app, "DELETE", "/v1/books/111", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/v1/books/111", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    send(&app, "DELETE", "/v1/authors/1", None).await;
    let (_, body) = send(&app, "GET", "/v1/books", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

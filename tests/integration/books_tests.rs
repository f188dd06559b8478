//! In-process tests of the book endpoints over the in-memory store

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, repository::Repository, AppConfig, AppState};

fn app() -> Router {
    api::create_router(AppState::new(AppConfig::default(), Repository::in_memory()))
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        request = request.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

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

async fn create(app: &Router, body: Value) -> Value {
    let (status, book) = send(
        app,
        Method::POST,
        "/books/",
        Some(&basic("admin", "secret")),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    book
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let book = create(
        &app,
        json!({"title": "Test Book", "author": "Tester", "year": 2024}),
    )
    .await;

    assert!(book["id"].is_number());
    assert_eq!(book["title"], "Test Book");
    assert_eq!(book["author"], "Tester");
    assert_eq!(book["year"], 2024);
    assert_eq!(book["description"], Value::Null);
}

#[tokio::test]
async fn test_created_ids_are_fresh() {
    let app = app();
    let first = create(&app, json!({"title": "One"})).await;
    let second = create(&app, json!({"title": "Two"})).await;
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_list_counts_creates() {
    let app = app();

    let (status, books) = send(&app, Method::GET, "/books/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([]));

    for title in ["B1", "B2", "B3"] {
        create(&app, json!({"title": title, "author": "A1"})).await;
    }

    let (status, books) = send(&app, Method::GET, "/books/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books.as_array().unwrap().len(), 3);

    // Same collection without the trailing slash
    let (_, without_slash) = send(&app, Method::GET, "/books", None, None).await;
    assert_eq!(without_slash, books);
}

#[tokio::test]
async fn test_get_is_repeatable() {
    let app = app();
    let book = create(&app, json!({"title": "Stable", "description": "Same"})).await;
    let uri = format!("/books/{}", book["id"]);

    let (status, first) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(first, book);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_book_is_not_found() {
    let app = app();
    let auth = basic("admin", "secret");

    let (status, body) = send(&app, Method::GET, "/books/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Book not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/999",
        Some(&auth),
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/books/999", Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let app = app();
    let book = create(
        &app,
        json!({"title": "Old Title", "author": "Old Author", "description": "Old", "year": 1990}),
    )
    .await;
    let uri = format!("/books/{}", book["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&basic("admin", "secret")),
        Some(json!({"title": "New Title", "year": 2000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let expected = json!({
        "id": book["id"],
        "title": "New Title",
        "author": null,
        "description": null,
        "year": 2000
    });
    assert_eq!(updated, expected);

    let (_, fetched) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_delete_then_get() {
    let app = app();
    let book = create(&app, json!({"title": "To Delete", "author": "X"})).await;
    let uri = format!("/books/{}", book["id"]);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &uri,
        Some(&basic("admin", "secret")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Book deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_writes_without_credentials_change_nothing() {
    let app = app();
    let book = create(&app, json!({"title": "Keep Me"})).await;
    let uri = format!("/books/{}", book["id"]);
    let wrong = basic("admin", "wrong");

    for auth in [None, Some(wrong.as_str())] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/books/",
            auth,
            Some(json!({"title": "Intruder"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = send(&app, Method::PUT, &uri, auth, Some(json!({"title": "Changed"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::DELETE, &uri, auth, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (_, books) = send(&app, Method::GET, "/books/", None, None).await;
    assert_eq!(books, json!([book]));
}

#[tokio::test]
async fn test_unauthorized_response_has_challenge() {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/books/1")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Basic");
}

#[tokio::test]
async fn test_invalid_payloads_are_unprocessable() {
    let app = app();
    let auth = basic("admin", "secret");

    for body in [
        json!({"author": "No Title"}),
        json!({"title": null}),
        json!({"title": "Bad Year", "year": "soon"}),
    ] {
        let (status, response) = send(&app, Method::POST, "/books/", Some(&auth), Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["error"], "ValidationError");
    }

    let (status, _) = send(&app, Method::GET, "/books/abc", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, books) = send(&app, Method::GET, "/books/", None, None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_empty_title_is_accepted() {
    let app = app();
    let book = create(&app, json!({"title": ""})).await;
    assert_eq!(book["title"], "");

    let uri = format!("/books/{}", book["id"]);
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&basic("admin", "secret")),
        Some(json!({"title": "", "author": "Anonymous"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "");
    assert_eq!(updated["author"], "Anonymous");
}

#[tokio::test]
async fn test_ids_beyond_key_range_are_not_found() {
    let app = app();
    let auth = basic("admin", "secret");
    create(&app, json!({"title": "Only Book"})).await;

    for uri in ["/books/9999999999", "/books/-9999999999"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Book not found");

        let (status, _) = send(
            &app,
            Method::PUT,
            uri,
            Some(&auth),
            Some(json!({"title": "Ghost"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, uri, Some(&auth), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, books) = send(&app, Method::GET, "/books/", None, None).await;
    assert_eq!(books.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use todo_core::TaskStore;
use todo_server::todo::TodoState;
use todo_server::web::create_app;
use tower::ServiceExt;

fn create_test_app() -> Router {
    create_app(Arc::new(TodoState::new()))
}

fn create_test_app_with_store(store: TaskStore) -> Router {
    create_app(Arc::new(TodoState::with_store(store)))
}

/// Sends one request and returns the status plus the parsed JSON body
/// (Null for empty bodies).
async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
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

#[tokio::test]
async fn can_check_health_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn listing_an_empty_store_returns_an_empty_array() {
    let app = create_test_app();

    let (status, body) = send_json(app, "GET", "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn can_create_a_task() {
    let app = create_test_app();

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "Buy milk"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task_id"], 1);
    assert_eq!(body["task"]["id"], 1);
    assert_eq!(body["task"]["description"], "Buy milk");
    assert_eq!(body["task"]["status"], "Pending");

    let (status, body) = send_json(app, "GET", "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 1, "description": "Buy milk", "status": "Pending"}])
    );
}

#[tokio::test]
async fn create_rejects_a_missing_description() {
    let app = create_test_app();

    let (status, body) = send_json(app, "POST", "/api/todos", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Description is required");
}

#[tokio::test]
async fn create_rejects_a_blank_description() {
    let app = create_test_app();

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Description is required");

    let (_, body) = send_json(app, "GET", "/api/todos", None).await;
    assert_eq!(body, json!([]), "A rejected create must not add a task");
}

#[tokio::test]
async fn create_trims_the_description() {
    let app = create_test_app();

    let (status, body) = send_json(
        app,
        "POST",
        "/api/todos",
        Some(json!({"description": "  Walk the dog  "})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["task"]["description"], "Walk the dog");
}

#[tokio::test]
async fn can_get_a_task_by_id() {
    let app = create_test_app();

    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "Buy milk"})),
    )
    .await;

    let (status, body) = send_json(app, "GET", "/api/todos/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "description": "Buy milk", "status": "Pending"})
    );
}

#[tokio::test]
async fn getting_an_unknown_task_returns_404() {
    let app = create_test_app();

    let (status, body) = send_json(app, "GET", "/api/todos/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task with ID 42 not found");
}

#[tokio::test]
async fn a_non_numeric_id_is_a_client_error() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/todos/not-a-number")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn can_update_a_task_description() {
    let app = create_test_app();

    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "Old text"})),
    )
    .await;

    let (status, body) = send_json(
        app.clone(),
        "PUT",
        "/api/todos/1",
        Some(json!({"description": "New text"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");
    assert_eq!(body["task"]["description"], "New text");

    let (_, body) = send_json(app, "GET", "/api/todos/1", None).await;
    assert_eq!(body["description"], "New text");
}

#[tokio::test]
async fn update_rejects_a_blank_description_and_keeps_the_old_value() {
    let app = create_test_app();

    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "Keep me"})),
    )
    .await;

    let (status, _) = send_json(
        app.clone(),
        "PUT",
        "/api/todos/1",
        Some(json!({"description": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send_json(app, "GET", "/api/todos/1", None).await;
    assert_eq!(body["description"], "Keep me");
}

#[tokio::test]
async fn updating_an_unknown_task_returns_404() {
    let app = create_test_app();

    let (status, body) = send_json(
        app,
        "PUT",
        "/api/todos/9",
        Some(json!({"description": "text"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task with ID 9 not found");
}

#[tokio::test]
async fn marking_a_task_completed_is_idempotent() {
    let app = create_test_app();

    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "A"})),
    )
    .await;

    let (status, body) = send_json(app.clone(), "PATCH", "/api/todos/1/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task marked as completed");
    assert_eq!(body["task"]["status"], "Completed");

    let (status, body) = send_json(app, "PATCH", "/api/todos/1/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["status"], "Completed");
}

#[tokio::test]
async fn completing_an_unknown_task_returns_404() {
    let app = create_test_app();

    let (status, _) = send_json(app, "PATCH", "/api/todos/7/complete", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_task_keeps_the_other_ids_and_never_reuses_them() {
    let app = create_test_app();

    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "A"})),
    )
    .await;
    send_json(
        app.clone(),
        "POST",
        "/api/todos",
        Some(json!({"description": "B"})),
    )
    .await;

    let (status, body) = send_json(app.clone(), "DELETE", "/api/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully");

    let (status, _) = send_json(app.clone(), "GET", "/api/todos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send_json(app.clone(), "GET", "/api/todos", None).await;
    assert_eq!(body, json!([{"id": 2, "description": "B", "status": "Pending"}]));

    // A fresh task continues the sequence instead of filling the gap
    let (_, body) = send_json(
        app,
        "POST",
        "/api/todos",
        Some(json!({"description": "C"})),
    )
    .await;
    assert_eq!(body["task_id"], 3);
}

#[tokio::test]
async fn deleting_an_unknown_task_returns_404() {
    let app = create_test_app();

    let (status, body) = send_json(app, "DELETE", "/api/todos/5", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task with ID 5 not found");
}

#[tokio::test]
async fn stats_counts_completed_tasks_case_insensitively() {
    let mut store = TaskStore::new();
    store.add("A").unwrap();
    store.add("B").unwrap();
    store.add("C").unwrap();
    store.mark_completed(1);
    store.update_status(2, "completed").unwrap();
    let app = create_test_app_with_store(store);

    let (status, body) = send_json(app, "GET", "/api/todos/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_tasks": 3, "completed_tasks": 2, "pending_tasks": 1})
    );
}

#[tokio::test]
async fn stats_on_an_empty_store_are_all_zero() {
    let app = create_test_app();

    let (status, body) = send_json(app, "GET", "/api/todos/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_tasks": 0, "completed_tasks": 0, "pending_tasks": 0})
    );
}

#[tokio::test]
async fn a_malformed_body_is_a_client_error() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

//! End-to-end tests driving the full router in-process.

use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use quillmind_daemon::ai::{AiConfig, TextActionProxy};
use quillmind_daemon::auth::TokenService;
use quillmind_daemon::database::Database;
use quillmind_daemon::http_server::{self, Config};
use quillmind_daemon::ServiceState;

async fn setup_app() -> Router {
    let db_url = url::Url::parse("sqlite::memory:").unwrap();
    let database = Database::connect(&db_url).await.unwrap();
    let tokens = TokenService::new(vec![7u8; 32], Duration::from_secs(3600));
    let ai = TextActionProxy::new(&AiConfig::default()).unwrap();
    let state = ServiceState::new(database, tokens, ai);

    let config = Config::new(
        "127.0.0.1:0".parse().unwrap(),
        &["http://localhost:3000".to_string()],
    )
    .unwrap();
    http_server::router(&config, state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Register and log in, returning the access token.
async fn sign_up(app: &Router, username: &str) -> String {
    let email = format!("{}@example.com", username);
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": username, "email": email, "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["accessToken"].as_str().unwrap().to_string()
}

async fn create_project(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/projects",
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["project_id"].as_str().unwrap().to_string()
}

async fn create_file(app: &Router, token: &str, project_id: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/projects/{}/files", project_id),
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["file_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_write_and_read_back_file() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;

    let project_id = create_project(&app, &alice, "Novel").await;
    let file_id = create_file(&app, &alice, &project_id, "ch1.md").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/files/{}", file_id),
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File updated successfully.");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/files/{}", file_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "hello");
    assert_eq!(body["name"], "ch1.md");
    assert_eq!(body["path"], "/ch1.md");
    assert_eq!(body["file_type"], "markdown");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/files", project_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let files = body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].get("content").is_none());
}

#[tokio::test]
async fn test_other_users_are_forbidden() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;
    let bob = sign_up(&app, "bob").await;

    let project_id = create_project(&app, &alice, "Novel").await;
    let file_id = create_file(&app, &alice, &project_id, "ch1.md").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/files/{}", file_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/files", project_id),
        Some(&bob),
        Some(json!({"name": "intruder.md"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/files/{}", file_id),
        Some(&bob),
        Some(json!({"content": "overwritten"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/files/{}", file_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/files", project_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/projects", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // alice's file is untouched
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/files/{}", file_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/files", project_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["file_id"], file_id.as_str());
}

#[tokio::test]
async fn test_login_response_field_names() {
    let app = setup_app().await;
    sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "hunter22"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["accessToken", "message", "user"]);

    let mut user_keys: Vec<&str> = body["user"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    user_keys.sort_unstable();
    assert_eq!(user_keys, ["email", "userId", "username"]);
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = setup_app().await;
    sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "someone-else",
            "email": "alice@example.com",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "Email already registered.");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = setup_app().await;
    sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_deleting_project_removes_its_files() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;
    let project_id = create_project(&app, &alice, "Novel").await;
    let file_id = create_file(&app, &alice, &project_id, "ch1.md").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/projects/{}", project_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_id"], project_id.as_str());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/files/{}", file_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/projects/{}", project_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bearer_credentials() {
    let app = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, body) = send(&app, Method::GET, "/api/projects", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let app = setup_app().await;
    let tokens = TokenService::new(vec![7u8; 32], Duration::from_secs(3600));
    let two_hours_ago = OffsetDateTime::now_utc() - time::Duration::hours(2);
    let issued = tokens
        .issue_at(Uuid::new_v4(), "alice", two_hours_ago)
        .unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/projects",
        Some(&issued.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;
    let project_id = create_project(&app, &alice, "Novel").await;
    let file_id = create_file(&app, &alice, &project_id, "ch1.md").await;
    let uri = format!("/api/files/{}", file_id);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({"content": "same"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(body["content"], "same");
}

#[tokio::test]
async fn test_malformed_bodies_are_validation_errors() {
    let app = setup_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "validation");

    let alice = sign_up(&app, "alice").await;
    let project_id = create_project(&app, &alice, "Novel").await;
    let file_id = create_file(&app, &alice, &project_id, "ch1.md").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/files/{}", file_id),
        Some(&alice),
        Some(json!({"content": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Content must be a string.");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&alice),
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_ids_and_routes_are_not_found() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/files/not-a-uuid",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/files/{}", uuid::Uuid::new_v4()),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_text_action_without_upstream_is_unavailable() {
    let app = setup_app().await;
    let alice = sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/action",
        Some(&alice),
        Some(json!({"action": "summarize", "text": "A long day."})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "upstream");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ai/action",
        None,
        Some(json!({"action": "summarize", "text": "A long day."})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_endpoints() {
    let app = setup_app().await;

    let (status, _) = send(&app, Method::GET, "/_status/livez", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/_status/readyz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

use helpdesk_api::auth::jwt::JwtConfig;
use helpdesk_api::auth::password::hash_password;
use helpdesk_api::config::ServerConfig;
use helpdesk_api::router::build_app_router;
use helpdesk_api::state::AppState;
use helpdesk_core::email::Email;
use helpdesk_core::notify::{NotificationJob, NotificationQueue};
use helpdesk_core::password::PasswordHash;
use helpdesk_core::ports::UserStore;
use helpdesk_core::roles::Role;
use helpdesk_core::user::{NewUser, User};
use helpdesk_db::PgUserStore;

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and fixed JWT secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the production router against `pool`. Queued notifications are dropped.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_notifications(pool).0
}

/// Build the production router and hand back the notification queue receiver
/// so tests can inspect what was queued.
pub fn build_test_app_with_notifications(
    pool: PgPool,
) -> (Router, UnboundedReceiver<NotificationJob>) {
    let (queue, receiver) = NotificationQueue::new();
    let state = AppState::new(pool, test_config(), queue);
    (build_app_router(state), receiver)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with an Argon2 hash of `password`.
pub async fn create_user(pool: &PgPool, email: &str, role: Role, password: &str) -> User {
    let hashed = hash_password(password).expect("hashing should succeed");
    PgUserStore::new(pool.clone())
        .create(NewUser {
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: PasswordHash::new(hashed),
            role,
        })
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["data"]["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

/// Create a user and log them in. Returns the user and their access token.
pub async fn user_with_token(app: &Router, pool: &PgPool, email: &str, role: Role) -> (User, String) {
    let user = create_user(pool, email, role, "password123").await;
    let token = login(app, email, "password123").await;
    (user, token)
}

/// Create a ticket through the API as the holder of `token`; returns its JSON.
pub async fn create_ticket(app: &Router, token: &str, title: &str) -> Value {
    let body = serde_json::json!({
        "title": title,
        "description": "Something stopped working this morning",
    });
    let response = post_json_auth(app, "/api/v1/tickets", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "ticket creation should succeed");
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::ServiceExt;
use axum_test::{TestResponse, TestServer};
use blog_api::{app, state::AppState};
use blog_core::config::AuthConfig;
use blog_core::repositories::in_memory_blog_repository::InMemoryBlogRepository;
use blog_core::repositories::in_memory_user_repository::InMemoryUserRepository;
use blog_core::services::clock::FixedClock;
use chrono::Utc;
use serde_json::{json, Value};

pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<FixedClock>,
}

pub fn test_app_with_api_key(api_key: Option<&str>) -> TestApp {
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let state = AppState::with_clock(
        AuthConfig::new("test-access-secret", "test-refresh-secret").unwrap(),
        api_key.map(str::to_string),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryBlogRepository::new()),
        clock.clone(),
    );
    let service = ServiceExt::<Request>::into_make_service(app(state));
    TestApp {
        server: TestServer::new(service).unwrap(),
        clock,
    }
}

pub fn test_app() -> TestApp {
    test_app_with_api_key(None)
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

pub async fn register(app: &TestApp, email: &str, role: &str) -> TestResponse {
    app.server
        .post("/api/v1/user/register")
        .json(&json!({
            "email": email,
            "username": email.split('@').next().unwrap(),
            "password": "P@ssw0rd",
            "confirmPassword": "P@ssw0rd",
            "role": role,
        }))
        .await
}

/// Registers and logs in, returning (user id, access token, refresh token).
pub async fn sign_in(app: &TestApp, email: &str, role: &str) -> (String, String, String) {
    let registered = register(app, email, role).await;
    registered.assert_status(StatusCode::CREATED);
    let id = registered.json::<Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let login = app
        .server
        .post("/api/v1/user/login")
        .json(&json!({ "email": email, "password": "P@ssw0rd" }))
        .await;
    login.assert_status(StatusCode::OK);
    let body = login.json::<Value>();
    (
        id,
        body["data"]["accessToken"].as_str().unwrap().to_string(),
        body["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}

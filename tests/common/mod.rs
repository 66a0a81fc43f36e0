//! Shared harness for router-level tests: an in-memory store behind the real
//! router, JWT sessions and a bootstrap administrator.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use gym_house::adapters::auth::{JwtSessions, Pbkdf2PasswordHasher};
use gym_house::adapters::http::{app_router, AppState};
use gym_house::adapters::memory::InMemoryStore;
use gym_house::application::handlers::{BootstrapAdminCommand, BootstrapAdminHandler};

pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = InMemoryStore::new();
        let sessions = Arc::new(JwtSessions::new(
            &SecretString::new("integration-test-secret-0123456789abcdef".to_string()),
            3600,
        ));
        let state = AppState::from_store(
            Arc::new(store.clone()),
            Arc::new(Pbkdf2PasswordHasher::new(1_000)),
            sessions.clone(),
            sessions,
        );

        BootstrapAdminHandler::new(state.users.clone(), state.hasher.clone())
            .handle(BootstrapAdminCommand {
                username: ADMIN.to_string(),
                email: "admin@example.com".to_string(),
                password: SecretString::new(ADMIN_PASSWORD.to_string()),
            })
            .await
            .unwrap();

        Self {
            router: app_router(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(get(uri, token)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, form: &str) -> Response<Body> {
        self.send(post_form(uri, token, form)).await
    }

    /// Logs in and returns the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login", None, &format!("username={}&password={}", username, password))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {} failed", username);
        json(response).await["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN, ADMIN_PASSWORD).await
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, token: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// Asserts a `303` to `to` and returns the body with its notices.
pub async fn expect_redirect(response: Response<Body>, to: &str) -> Value {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), to);
    json(response).await
}

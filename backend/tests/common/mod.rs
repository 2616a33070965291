//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. The app runs
//! against the in-memory store, so no external services are required.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fitdiary_backend::repositories::MemoryStore;
use fitdiary_backend::{config::AppConfig, routes, state::AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a new test application backed by an in-memory store
    pub async fn new() -> Self {
        let state = AppState::new(test_config(), Arc::new(MemoryStore::new()));
        let app = routes::create_router(state);
        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request("POST", path, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request("PUT", path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.request("DELETE", path, None).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(body) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(bytes.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: fitdiary_backend::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        store: fitdiary_backend::config::StoreConfig {
            redis_url: "redis://localhost:6379".to_string(),
        },
    }
}

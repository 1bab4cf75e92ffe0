//! In-process HTTP client for the router under test.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use community_core::common::UserId;
use community_core::server::auth::JwtService;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Response status plus parsed JSON body (`Null` when empty).
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// The `error` message of a failed request.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct ApiClient {
    router: Router,
    jwt_service: Arc<JwtService>,
}

impl ApiClient {
    pub fn new(router: Router, jwt_service: Arc<JwtService>) -> Self {
        Self {
            router,
            jwt_service,
        }
    }

    pub async fn get(&self, path: &str, as_user: Option<UserId>) -> ApiResponse {
        self.send(Method::GET, path, as_user, None).await
    }

    pub async fn post(&self, path: &str, as_user: Option<UserId>, body: Value) -> ApiResponse {
        self.send(Method::POST, path, as_user, Some(body)).await
    }

    pub async fn put(&self, path: &str, as_user: Option<UserId>, body: Value) -> ApiResponse {
        self.send(Method::PUT, path, as_user, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        as_user: Option<UserId>,
        body: Option<Value>,
    ) -> ApiResponse {
        let mut request = Request::builder().method(method).uri(path);

        if let Some(user_id) = as_user {
            let token = self
                .jwt_service
                .create_token(user_id)
                .expect("Failed to create test token");
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        ApiResponse { status, body }
    }
}

//! HTTP client for integration testing.
//!
//! Drives the axum router in-process with `oneshot`, signing requests with
//! a real JWT so the auth middleware runs exactly as in production.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use classroom_core::common::{ActorRole, MemberId};
use classroom_core::domains::auth::JwtService;
use classroom_core::kernel::ServerDeps;
use classroom_core::server::{build_router, AxumAppState};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// Client for executing requests against the router in tests.
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
    jwt_service: Arc<JwtService>,
    token: Option<String>,
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Machine-readable code of an error body, empty if absent.
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or("")
    }
}

impl ApiClient {
    /// Creates an anonymous client over the given dependencies.
    pub fn new(deps: ServerDeps) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            TEST_JWT_SECRET,
            TEST_JWT_ISSUER.to_string(),
        ));
        let state = AxumAppState {
            server_deps: Arc::new(deps),
            jwt_service: jwt_service.clone(),
        };

        Self {
            router: build_router(state, Duration::from_secs(5)),
            jwt_service,
            token: None,
        }
    }

    /// Same router, authenticated as a plain member.
    pub fn as_member(&self, member_id: i64) -> Self {
        self.authenticated(member_id, ActorRole::Member)
    }

    /// Same router, authenticated as an approver.
    pub fn as_approver(&self, member_id: i64) -> Self {
        self.authenticated(member_id, ActorRole::Approver)
    }

    /// Same router, sending an arbitrary bearer token.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..self.clone()
        }
    }

    fn authenticated(&self, member_id: i64, role: ActorRole) -> Self {
        let token = self
            .jwt_service
            .create_token(MemberId::from_i64(member_id), role)
            .expect("Failed to sign test token");
        self.with_token(&token)
    }

    pub async fn get(&self, path: &str) -> ApiResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ApiResponse {
        self.send(Method::POST, path, Some(body.to_string())).await
    }

    /// POST a body verbatim, for malformed JSON.
    pub async fn post_raw(&self, path: &str, body: &str) -> ApiResponse {
        self.send(Method::POST, path, Some(body.to_string())).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
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
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        ApiResponse { status, body }
    }
}

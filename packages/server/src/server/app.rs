//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AuditSinkKind, Config};
use crate::domains::auth::JwtService;
use crate::kernel::{
    BaseAuditSink, PostgresAbsenceStore, PostgresAuditSink, ServerDeps, TracingAuditSink,
};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    decide_absence_handler, get_absence_handler, health_handler, list_absences_handler,
    list_group_absences_handler, submit_absence_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Wire the Postgres store and the configured audit sink
pub fn build_server_deps(pool: PgPool, config: &Config) -> ServerDeps {
    let audit_sink: Arc<dyn BaseAuditSink> = match config.audit_sink {
        AuditSinkKind::Database => Arc::new(PostgresAuditSink::new(pool.clone())),
        AuditSinkKind::Log => Arc::new(TracingAuditSink),
    };

    ServerDeps::new(
        Arc::new(PostgresAbsenceStore::new(pool)),
        audit_sink,
        config.policy,
    )
}

/// Build the Axum application router from configuration
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let server_deps = Arc::new(build_server_deps(pool, config));
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    build_router(
        AxumAppState {
            server_deps,
            jwt_service,
        },
        config.request_timeout,
    )
}

/// Build the router around existing state
///
/// Requests exceeding `request_timeout` are answered with 408. A decision
/// already committed by then stays committed.
pub fn build_router(state: AxumAppState, request_timeout: Duration) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let jwt_service = state.jwt_service.clone();

    Router::new()
        .route(
            "/api/absences",
            post(submit_absence_handler).get(list_absences_handler),
        )
        .route("/api/absences/decide", post(decide_absence_handler))
        .route("/api/absences/:id", get(get_absence_handler))
        .route(
            "/api/groups/:group_id/absences",
            get(list_group_absences_handler),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

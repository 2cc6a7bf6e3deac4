//! Router configuration for Web API.

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::error::Fault;
use super::handlers::{ask_question, rss_feeds, AppState, ASK_QUESTION_ROUTE, RSS_FEEDS_ROUTE};
use super::middleware::{
    create_cors_layer, log_request, map_faults, panic_to_fault, wildcard_credentials_layer,
};
use crate::config::CorsConfig;

/// Create the main API router.
///
/// Layers, outermost first: CORS gate (credentials, then origin policy),
/// global fault mapper, request logger, HTTP tracing, panic capture.
pub fn create_router(app_state: Arc<AppState>, cors: &CorsConfig) -> Router {
    let rss_path = app_state.route_path(RSS_FEEDS_ROUTE);
    let question_path = app_state.route_path(ASK_QUESTION_ROUTE);

    Router::new()
        .route(&rss_path, post(rss_feeds).fallback(method_not_allowed))
        .route(
            &question_path,
            post(ask_question).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(wildcard_credentials_layer())
                .layer(create_cors_layer(cors))
                .layer(middleware::from_fn(map_faults))
                .layer(middleware::from_fn(log_request))
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_to_fault)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> Fault {
    Fault::http(StatusCode::NOT_FOUND, "Not Found")
}

async fn method_not_allowed() -> Fault {
    Fault::http(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

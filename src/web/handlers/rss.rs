//! RSS handlers for Web API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{handler_failure, AppState, RSS_FEEDS_ROUTE};
use crate::timing::timed;
use crate::web::dto::{AppJson, RssRequest};

/// POST {api}/rss-feeds/ - Fetch the raw documents of the named feeds.
pub async fn rss_feeds(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RssRequest>,
) -> Response {
    match timed(|| state.feeds.fetch_feeds(&req.sources)).await {
        Ok(result) => {
            tracing::debug!(
                route = %state.route_path(RSS_FEEDS_ROUTE),
                ok = result.inner().is_ok(),
                exec_time = result.exec_time(),
                "{}",
                result.inner().message()
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => handler_failure(&state.route_path(RSS_FEEDS_ROUTE), &e),
    }
}

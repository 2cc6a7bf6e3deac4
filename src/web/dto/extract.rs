//! Request body extraction for Web API DTOs.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::web::error::Fault;

/// A JSON extractor whose rejections are structured faults.
///
/// A body without `Content-Type` is read as JSON. Every body problem (wrong
/// content type, malformed JSON, missing or mistyped fields) rejects with a
/// 422 [`Fault::Http`], so it ends up in the global fault mapper rather than
/// a handler.
///
/// # Example
///
/// ```ignore
/// use newsdesk::web::dto::AppJson;
///
/// async fn rss_feeds(AppJson(req): AppJson<RssRequest>) -> Response {
///     // req is already deserialized
///     // ...
/// }
/// ```
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Fault;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_body = accepts_as_json(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Fault::http(rejection.status(), rejection.body_text()))?;

        if !json_body {
            return Err(Fault::http(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Expected request with `Content-Type: application/json`",
            ));
        }

        serde_json::from_slice(&bytes).map(AppJson).map_err(|e| {
            let reason = match e.classify() {
                Category::Data => "Failed to deserialize the JSON body into the target type",
                _ => "Failed to parse the request body as JSON",
            };
            Fault::http(StatusCode::UNPROCESSABLE_ENTITY, format!("{}: {}", reason, e))
        })
    }
}

/// Missing content type, `application/json` and `application/*+json` count as JSON.
fn accepts_as_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

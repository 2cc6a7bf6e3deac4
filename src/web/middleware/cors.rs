//! CORS middleware configuration.

use axum::http::header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::HeaderValue;
use axum::response::Response;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CorsConfig;

/// Header maker used by [`wildcard_credentials_layer`].
pub type WildcardCredentials = fn(&Response) -> Option<HeaderValue>;

/// Create the CORS layer applied to every route.
///
/// Without `require_auth` any origin is allowed (`*`). With it, only the
/// configured origins are reflected back, and credentials are allowed.
/// Credentials for the open policy come from [`wildcard_credentials_layer`].
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.require_auth {
        // CorsLayer refuses credentials next to a wildcard origin
        return CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    let parsed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(parsed_origins))
}

/// Allow credentials on responses that carry `Access-Control-Allow-Origin: *`.
///
/// Must sit outside the CORS layer so it sees the headers that layer wrote.
pub fn wildcard_credentials_layer() -> SetResponseHeaderLayer<WildcardCredentials> {
    SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        wildcard_credentials as WildcardCredentials,
    )
}

fn wildcard_credentials(response: &Response) -> Option<HeaderValue> {
    let wildcard = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_some_and(|origin| origin.as_bytes() == b"*");

    wildcard.then(|| HeaderValue::from_static("true"))
}

//! Fault interception: request logging, panic capture and the global fault mapper.

use std::any::Any;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::web::error::Fault;

/// Log any fault coming back from downstream and pass it on unchanged.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if let Some(fault) = response.extensions().get::<Fault>() {
        tracing::error!(
            %method,
            %path,
            "Passing fault to global fault mapper: {}",
            fault
        );
    }

    response
}

/// Last-resort converter from a fault to an `ErrorResponse`.
///
/// Responses without a fault pass through untouched.
pub async fn map_faults(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<Fault>() {
        Some(fault) => render_fault(&fault),
        None => response,
    }
}

/// Render a fault as its final HTTP response.
pub fn render_fault(fault: &Fault) -> Response {
    match fault {
        Fault::Http { status, .. } => {
            tracing::error!(status = status.as_u16(), "HTTP fault occurred: {}", fault);
        }
        Fault::Unhandled { .. } => {
            tracing::error!("Unhandled fault: {}", fault);
        }
    }

    (fault.status_code(), Json(fault.to_error_response())).into_response()
}

/// Turn a handler panic into an unhandled fault.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_to_fault(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    Fault::unhandled(message).into_response()
}

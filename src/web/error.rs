//! Faults that escape request handlers, and the error body they become.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Message used when a structured fault carries no detail.
pub const HTTP_ERROR_MESSAGE: &str = "HTTP Error";

/// Message used for every unhandled fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// A fault raised outside a handler's own guard.
///
/// Returning a `Fault` does not produce a finished response: it travels in
/// the response extensions until the global fault mapper renders it as an
/// [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Carries its own status code and optional detail text.
    Http {
        status: StatusCode,
        detail: Option<String>,
    },
    /// Anything else. Always rendered as 500.
    Unhandled { message: String },
}

impl Fault {
    /// Structured fault with a detail message.
    pub fn http(status: StatusCode, detail: impl Into<String>) -> Self {
        Fault::Http {
            status,
            detail: Some(detail.into()),
        }
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        Fault::Unhandled {
            message: message.into(),
        }
    }

    /// HTTP status the fault maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Fault::Http { status, .. } => *status,
            Fault::Unhandled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the error body for this fault.
    pub fn to_error_response(&self) -> ErrorResponse {
        let message = match self {
            Fault::Http {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            Fault::Http { .. } => HTTP_ERROR_MESSAGE.to_string(),
            Fault::Unhandled { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        ErrorResponse {
            status_code: self.status_code().as_u16(),
            content: ErrorContent {
                message,
                details: self.to_string(),
            },
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fault::Http { status, detail } => {
                let detail = detail
                    .as_deref()
                    .or_else(|| status.canonical_reason())
                    .unwrap_or(HTTP_ERROR_MESSAGE);
                write!(f, "{}: {}", status.as_u16(), detail)
            }
            Fault::Unhandled { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for Fault {}

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// HTTP-level error body produced only by the global fault mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub content: ErrorContent,
}

/// Inner part of [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorContent {
    pub message: String,
    pub details: String,
}

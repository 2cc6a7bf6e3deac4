//! Response DTOs for Web API.

use serde::Serialize;

/// Body of a 500 returned by a handler whose business function failed.
///
/// Envelope-shaped (`{message, data: null}`), unlike the `ErrorResponse`
/// the fault mapper produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerFailure {
    pub message: String,
    pub data: Option<()>,
}

impl HandlerFailure {
    pub fn new(fault: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Internal Server Error: {}", fault),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_failure_serialize() {
        let body = HandlerFailure::new("RSS error: connection refused");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Internal Server Error: RSS error: connection refused",
                "data": null
            })
        );
    }
}

//! The `{status, message, data}` result shape shared by every business function.

use serde::Serialize;

/// Outcome tag carried by an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation succeeded and `data` is present.
    Ok,
    /// The operation failed in an expected way and `data` is null.
    Err,
}

/// Business function result.
///
/// `data` is `Some` exactly when `status` is [`Status::Ok`]; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    status: Status,
    message: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful result carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Business-level failure. Serialized with `data: null`.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            status: Status::Err,
            message: message.into(),
            data: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

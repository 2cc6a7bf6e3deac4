//! Middleware for Web API.

pub mod cors;
pub mod exception;

pub use cors::{create_cors_layer, wildcard_credentials_layer};
pub use exception::{log_request, map_faults, panic_to_fault, render_fault};

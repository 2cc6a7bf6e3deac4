//! Web API module for Newsdesk.
//!
//! HTTP surface for the feed and question endpoints, with the CORS gate and
//! fault handling middleware around them.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::{ErrorResponse, Fault};
pub use router::{create_health_router, create_router};
pub use server::WebServer;

//! Newsdesk - HTTP front end for named RSS feeds and LLM question answering.
//!
//! Every business endpoint answers with the same `{status, message, data}`
//! envelope, timed with `exec_time`. Faults that escape a handler are mapped
//! to a structured error body by the web middleware.

pub mod config;
pub mod envelope;
pub mod error;
pub mod llm;
pub mod logging;
pub mod rss;
pub mod timing;
pub mod web;

pub use config::Config;
pub use envelope::{Envelope, Status};
pub use error::{NewsdeskError, Result};
pub use timing::{timed, Timed};

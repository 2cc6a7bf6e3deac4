//! API handlers for Newsdesk.

pub mod question;
pub mod rss;

pub use question::*;
pub use rss::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::backtrace::Backtrace;
use std::sync::Arc;

use crate::config::Config;
use crate::llm::{LlmService, OpenAiCompatibleClient, QuestionService};
use crate::rss::{FeedService, RssService};
use crate::web::dto::HandlerFailure;
use crate::Result;

/// Route of the feed retrieval endpoint, relative to the API path.
pub const RSS_FEEDS_ROUTE: &str = "/rss-feeds/";

/// Route of the question answering endpoint, relative to the API path.
pub const ASK_QUESTION_ROUTE: &str = "/ask-question/";

/// Application state shared across handlers.
///
/// Immutable after startup; every request reads it through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Base path prepended to every business route.
    pub api_path: String,
    /// Feed retrieval business function.
    pub feeds: Arc<dyn FeedService>,
    /// Question answering business function.
    pub questions: Arc<dyn QuestionService>,
}

impl AppState {
    /// Create a new application state from explicit collaborators.
    pub fn new(
        api_path: impl Into<String>,
        feeds: Arc<dyn FeedService>,
        questions: Arc<dyn QuestionService>,
    ) -> Self {
        Self {
            api_path: api_path.into(),
            feeds,
            questions,
        }
    }

    /// Wire the production collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let feeds = Arc::new(RssService::new(&config.rss)?);
        let chat = Arc::new(OpenAiCompatibleClient::new(&config.llm)?);
        let questions = Arc::new(LlmService::new(chat, config.prompts.path.clone()));

        Ok(Self::new(config.api.path.clone(), feeds, questions))
    }

    /// Full path of `route` under the API path.
    pub fn route_path(&self, route: &str) -> String {
        format!("{}{}", self.api_path, route)
    }
}

/// Log a business function fault and answer with an Envelope-shaped 500.
///
/// The error chain is logged alongside a backtrace of the guard site, taken
/// regardless of `RUST_BACKTRACE`.
pub(crate) fn handler_failure(route: &str, err: &(dyn std::error::Error + 'static)) -> Response {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }

    let backtrace = Backtrace::force_capture();
    tracing::error!(
        route,
        error = ?err,
        "Error in {}: {}\nCaught at:\n{}",
        route,
        chain,
        backtrace
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(HandlerFailure::new(err)),
    )
        .into_response()
}

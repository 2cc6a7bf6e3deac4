//! Test helpers for Web API tests.
//!
//! Provides upstream stand-ins for feed sources and the model backend, fake
//! business functions, and a TestServer builder.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
use axum_test::TestServer;
use serde_json::{json, Map, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use newsdesk::config::{Config, CorsConfig, RssSource};
use newsdesk::llm::{AnswerData, QuestionService};
use newsdesk::rss::{FeedService, FeedsData};
use newsdesk::web::handlers::AppState;
use newsdesk::web::router::create_router;
use newsdesk::{Envelope, NewsdeskError, Result};

/// Body served by the feed upstream.
pub const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Hacker News</title></channel></rss>"#;

/// System prompt written into the test prompt directory.
pub const SYSTEM_PROMPT: &str = "You are a concise news assistant.";

/// Serve `app` on an ephemeral local port.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Feed source serving [`FEED_BODY`] at `/hn.xml`.
pub async fn feed_upstream() -> SocketAddr {
    spawn_upstream(Router::new().route("/hn.xml", get(|| async { FEED_BODY }))).await
}

/// Feed source whose `/slow.xml` signals `arrived` and then stalls for a minute.
pub async fn slow_feed_upstream(arrived: Arc<Notify>) -> SocketAddr {
    let app = Router::new()
        .route("/hn.xml", get(|| async { FEED_BODY }))
        .route(
            "/slow.xml",
            get(move || {
                let arrived = arrived.clone();
                async move {
                    arrived.notify_one();
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    FEED_BODY
                }
            }),
        );
    spawn_upstream(app).await
}

/// Model backend that answers every completion with `answer`.
pub async fn llm_upstream(answer: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |Json(_body): Json<Value>| async move {
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": answer}}]
            }))
        }),
    );
    spawn_upstream(app).await
}

/// Model backend that always fails.
pub async fn failing_llm_upstream() -> SocketAddr {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model overloaded") }),
    );
    spawn_upstream(app).await
}

/// Address nothing is listening on.
pub async fn dead_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Prompt directory holding `default.txt`.
pub fn prompts_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("default.txt"), SYSTEM_PROMPT).unwrap();
    dir
}

/// Configuration wired to local upstreams.
pub fn test_config(feed_addr: SocketAddr, llm_addr: SocketAddr, prompts: &TempDir) -> Config {
    let mut config = Config::default();
    config.rss.sources = vec![RssSource {
        name: "hacker-news".to_string(),
        url: format!("http://{}/hn.xml", feed_addr),
    }];
    config.llm.base_url = format!("http://{}/v1", llm_addr);
    config.llm.model = "test-model".to_string();
    config.llm.timeout_secs = 5;
    config.prompts.path = prompts.path().to_string_lossy().to_string();
    config
}

/// Create a test server for the given state.
pub fn create_test_server(state: AppState, cors: &CorsConfig) -> TestServer {
    let router = create_router(Arc::new(state), cors);
    TestServer::new(router).expect("Failed to create test server")
}

/// Create a test server with the production collaborators built from `config`.
pub fn create_server_from_config(config: &Config) -> TestServer {
    let state = AppState::from_config(config).expect("Failed to build app state");
    create_test_server(state, &config.cors)
}

/// Business function that always raises.
pub struct RaisingFeeds;

#[async_trait]
impl FeedService for RaisingFeeds {
    async fn fetch_feeds(&self, _names: &[String]) -> Result<Envelope<FeedsData>> {
        Err(NewsdeskError::Rss("connection reset by peer".to_string()))
    }
}

/// Business function that panics.
pub struct PanickingFeeds;

#[async_trait]
impl FeedService for PanickingFeeds {
    async fn fetch_feeds(&self, _names: &[String]) -> Result<Envelope<FeedsData>> {
        panic!("feed table corrupted")
    }
}

/// Business function that always raises.
pub struct RaisingQuestions;

#[async_trait]
impl QuestionService for RaisingQuestions {
    async fn answer_question(
        &self,
        _question: &str,
        _params: &Map<String, Value>,
    ) -> Result<Envelope<AnswerData>> {
        Err(NewsdeskError::Prompt("Invalid system type 'pirate'".to_string()))
    }
}

/// Business function that echoes the params it received as the answer.
pub struct EchoQuestions;

#[async_trait]
impl QuestionService for EchoQuestions {
    async fn answer_question(
        &self,
        question: &str,
        params: &Map<String, Value>,
    ) -> Result<Envelope<AnswerData>> {
        Ok(Envelope::ok(
            "Successfully answered question!",
            AnswerData {
                answer: json!({"question": question, "params": params}).to_string(),
            },
        ))
    }
}

/// State with the given fakes and no API prefix.
pub fn fake_state(
    feeds: Arc<dyn FeedService>,
    questions: Arc<dyn QuestionService>,
) -> AppState {
    AppState::new("", feeds, questions)
}

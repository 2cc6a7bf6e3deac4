//! Feed retrieval business function.

use async_trait::async_trait;
use serde::Serialize;

use super::fetcher::RssFetcher;
use crate::config::{RssConfig, RssSource};
use crate::envelope::Envelope;
use crate::Result;

/// Message returned when a requested name is not a configured source.
pub const UNKNOWN_SOURCE_MESSAGE: &str = "Unknown RSS source passed.";

/// Message returned when every requested feed was fetched.
pub const FEEDS_RETRIEVED_MESSAGE: &str = "Successfully retreived all RSS feeds.";

/// Payload of a successful feed retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedsData {
    /// Raw feed bodies, in request order.
    pub feeds: Vec<String>,
}

/// Fetches named feeds.
///
/// An unknown name is an expected failure and comes back as an `err`
/// envelope. Transport problems are returned as `Err`.
#[async_trait]
pub trait FeedService: Send + Sync {
    async fn fetch_feeds(&self, names: &[String]) -> Result<Envelope<FeedsData>>;
}

/// [`FeedService`] backed by the configured source table.
pub struct RssService {
    sources: Vec<RssSource>,
    fetcher: RssFetcher,
}

impl RssService {
    pub fn new(config: &RssConfig) -> Result<Self> {
        Ok(Self {
            sources: config.sources.clone(),
            fetcher: RssFetcher::new(config)?,
        })
    }

    /// Look up the URL configured for `name`.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.url.as_str())
    }
}

#[async_trait]
impl FeedService for RssService {
    async fn fetch_feeds(&self, names: &[String]) -> Result<Envelope<FeedsData>> {
        let mut feeds = Vec::with_capacity(names.len());

        // Sources are resolved lazily, so feeds listed before an unknown
        // name have already been fetched when the lookup fails.
        for name in names {
            let Some(url) = self.resolve(name) else {
                tracing::debug!(source = %name, "Unknown RSS source requested");
                return Ok(Envelope::err(UNKNOWN_SOURCE_MESSAGE));
            };

            tracing::debug!(source = %name, %url, "Fetching RSS feed");
            feeds.push(self.fetcher.fetch_raw(url).await?);
        }

        Ok(Envelope::ok(FEEDS_RETRIEVED_MESSAGE, FeedsData { feeds }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Status;
    use axum::{routing::get, Router};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn spawn_upstream() -> SocketAddr {
        let app = Router::new()
            .route("/a.xml", get(|| async { "<rss>a</rss>" }))
            .route("/b.xml", get(|| async { "<rss>b</rss>" }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn service_for(addr: SocketAddr) -> RssService {
        let config = RssConfig {
            sources: vec![
                RssSource {
                    name: "alpha".to_string(),
                    url: format!("http://{}/a.xml", addr),
                },
                RssSource {
                    name: "beta".to_string(),
                    url: format!("http://{}/b.xml", addr),
                },
            ],
            ..RssConfig::default()
        };
        RssService::new(&config).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolve() {
        let service = service_for("127.0.0.1:1".parse().unwrap());

        assert_eq!(service.resolve("alpha"), Some("http://127.0.0.1:1/a.xml"));
        assert_eq!(service.resolve("gamma"), None);
        assert_eq!(service.resolve("Alpha"), None);
    }

    #[tokio::test]
    async fn test_fetch_feeds_in_request_order() {
        let addr = spawn_upstream().await;
        let service = service_for(addr);

        let envelope = service
            .fetch_feeds(&names(&["beta", "alpha", "beta"]))
            .await
            .unwrap();

        assert_eq!(envelope.status(), Status::Ok);
        assert_eq!(envelope.message(), FEEDS_RETRIEVED_MESSAGE);
        assert_eq!(
            envelope.data().unwrap().feeds,
            vec!["<rss>b</rss>", "<rss>a</rss>", "<rss>b</rss>"]
        );
    }

    #[tokio::test]
    async fn test_fetch_feeds_unknown_source() {
        // Nothing listens here; the unknown name must short-circuit first.
        let service = service_for("127.0.0.1:1".parse().unwrap());

        let envelope = service.fetch_feeds(&names(&["bogus"])).await.unwrap();

        assert_eq!(envelope.status(), Status::Err);
        assert_eq!(envelope.message(), UNKNOWN_SOURCE_MESSAGE);
        assert!(envelope.data().is_none());
    }

    #[tokio::test]
    async fn test_fetch_feeds_unknown_after_known() {
        let addr = spawn_upstream().await;
        let service = service_for(addr);

        let envelope = service
            .fetch_feeds(&names(&["alpha", "bogus"]))
            .await
            .unwrap();

        assert_eq!(envelope.status(), Status::Err);
        assert!(envelope.data().is_none());
    }

    #[tokio::test]
    async fn test_fetch_feeds_empty_request() {
        let service = service_for("127.0.0.1:1".parse().unwrap());

        let envelope = service.fetch_feeds(&[]).await.unwrap();

        assert!(envelope.is_ok());
        assert!(envelope.data().unwrap().feeds.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_feeds_unreachable_source_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let service = service_for(addr);

        let result = service.fetch_feeds(&names(&["alpha"])).await;
        assert!(result.is_err());
    }
}

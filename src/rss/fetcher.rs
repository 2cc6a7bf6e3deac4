//! Raw RSS feed fetcher with resource limits.

use reqwest::Client;
use std::time::Duration;

use crate::config::RssConfig;
use crate::error::{NewsdeskError, Result};

/// User agent string for feed fetching.
const USER_AGENT: &str = "Newsdesk/1.0 (RSS Reader)";

/// Fetches feed documents and returns their bodies as text.
///
/// The body is not parsed: clients receive exactly what the source served.
#[derive(Debug, Clone)]
pub struct RssFetcher {
    client: Client,
    max_feed_size: u64,
}

impl RssFetcher {
    /// Create a new fetcher from the RSS configuration.
    pub fn new(config: &RssConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NewsdeskError::Rss(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
        })
    }

    /// Fetch the feed at `url` and decode its body as UTF-8.
    ///
    /// Non-success statuses are logged but the body is still returned.
    pub async fn fetch_raw(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsdeskError::Rss(format!("failed to fetch feed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "Feed source answered with a non-success status");
        }

        // Check content length if available
        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(self.too_large(content_length));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NewsdeskError::Rss(format!("failed to read response: {}", e)))?;

        // Check actual size
        if bytes.len() as u64 > self.max_feed_size {
            return Err(self.too_large(bytes.len() as u64));
        }

        String::from_utf8(bytes.to_vec())
            .map_err(|e| NewsdeskError::Rss(format!("feed body is not valid UTF-8: {}", e)))
    }

    fn too_large(&self, size: u64) -> NewsdeskError {
        NewsdeskError::Rss(format!(
            "feed too large: {} bytes (max {} bytes)",
            size, self.max_feed_size
        ))
    }
}

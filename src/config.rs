//! Configuration module for Newsdesk.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{NewsdeskError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// API routing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Base path prepended to every business route (e.g. "/api/v1").
    #[serde(default)]
    pub path: String,
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Restrict cross-origin requests to `allowed_origins`.
    #[serde(default)]
    pub require_auth: bool,
    /// Origins allowed when `require_auth` is set.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// A named RSS source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RssSource {
    /// Name clients use to request the feed.
    pub name: String,
    /// Feed URL.
    pub url: String,
}

/// RSS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RssConfig {
    /// Known feeds, in lookup order.
    #[serde(default)]
    pub sources: Vec<RssSource>,
    /// Connection timeout in seconds.
    #[serde(default = "default_rss_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_rss_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum feed size in bytes.
    #[serde(default = "default_rss_max_feed_size")]
    pub max_feed_size_bytes: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_rss_max_redirects")]
    pub max_redirects: usize,
}

fn default_rss_connect_timeout() -> u64 {
    10
}

fn default_rss_total_timeout() -> u64 {
    30
}

fn default_rss_max_feed_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

fn default_rss_max_redirects() -> usize {
    5
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            sources: vec![],
            connect_timeout_secs: default_rss_connect_timeout(),
            total_timeout_secs: default_rss_total_timeout(),
            max_feed_size_bytes: default_rss_max_feed_size(),
            max_redirects: default_rss_max_redirects(),
        }
    }
}

/// Language model backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Provider identifier (e.g. "openai", "groq").
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    /// Model identifier.
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// API key sent as a bearer token. Usually supplied via `LLM_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            api_key: String::new(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// System prompt configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    /// Directory holding the system prompt files.
    #[serde(default = "default_prompts_path")]
    pub path: String,
}

fn default_prompts_path() -> String {
    "prompts".to_string()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            path: default_prompts_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// API routing configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// RSS configuration.
    #[serde(default)]
    pub rss: RssConfig,
    /// Language model configuration.
    #[serde(default)]
    pub llm: LlmConfig,
    /// System prompt configuration.
    #[serde(default)]
    pub prompts: PromptsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interpret an environment flag the way the deployment scripts write them.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "t" | "yes" | "y"
    )
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(NewsdeskError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| NewsdeskError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `API_PATH`: base path for business routes
    /// - `REQUIRE_AUTH`: restrict CORS to the allow-list
    /// - `LLM_PROVIDER`, `LLM_MODEL`, `LLM_BASE_URL`, `LLM_API_KEY`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored, except for `API_PATH` where an empty value
    /// means "no prefix".
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("API_PATH") {
            self.api.path = path.trim().to_string();
        }

        if let Some(flag) = lookup("REQUIRE_AUTH") {
            self.cors.require_auth = parse_flag(&flag);
        }

        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(provider) = non_empty("LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(model) = non_empty("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(base_url) = non_empty("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(api_key) = non_empty("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cors.require_auth && self.cors.allowed_origins.is_empty() {
            return Err(NewsdeskError::Validation(
                "REQUIRE_AUTH is set but cors.allowed_origins is empty".to_string(),
            ));
        }

        let path = &self.api.path;
        if !path.is_empty() && (!path.starts_with('/') || path.ends_with('/')) {
            return Err(NewsdeskError::Validation(format!(
                "api path must start with '/' and must not end with '/': {path:?}"
            )));
        }

        let mut seen = HashSet::new();
        for source in &self.rss.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(NewsdeskError::Validation(format!(
                    "duplicate RSS source name: {}",
                    source.name
                )));
            }
            let url = url::Url::parse(&source.url).map_err(|e| {
                NewsdeskError::Validation(format!("invalid URL for RSS source {}: {e}", source.name))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(NewsdeskError::Validation(format!(
                    "unsupported URL scheme for RSS source {}: {}",
                    source.name,
                    url.scheme()
                )));
            }
        }

        if self.llm.model.trim().is_empty() {
            return Err(NewsdeskError::Validation("llm.model is not set".to_string()));
        }

        Ok(())
    }
}

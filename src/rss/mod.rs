//! RSS module for Newsdesk.
//!
//! Resolves configured feed names and fetches their raw documents.

pub mod fetcher;
pub mod service;

pub use fetcher::RssFetcher;
pub use service::{
    FeedService, FeedsData, RssService, FEEDS_RETRIEVED_MESSAGE, UNKNOWN_SOURCE_MESSAGE,
};

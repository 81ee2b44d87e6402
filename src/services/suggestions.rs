//! Address-bar suggestions.
//!
//! Local suggestions come from bookmarks and history. Remote suggestions come
//! from an OpenSearch-style endpoint and are best effort: any failure yields
//! an empty list.

use serde_json::Value;

use crate::types::bookmark::Bookmark;
use crate::types::history::HistoryItem;

pub const MAX_SUGGESTIONS: usize = 8;

/// Matches `query` against bookmarks then history; returns distinct URLs.
pub fn local_suggestions(
    query: &str,
    history: &[&HistoryItem],
    bookmarks: &[&Bookmark],
    limit: usize,
) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let candidates = bookmarks
        .iter()
        .map(|b| (b.url.as_str(), b.title.as_str()))
        .chain(history.iter().map(|h| (h.url.as_str(), h.title.as_str())));

    let mut out: Vec<String> = Vec::new();
    for (url, title) in candidates {
        if out.len() >= limit {
            break;
        }
        let hit = url.to_lowercase().contains(&needle) || title.to_lowercase().contains(&needle);
        if hit && !out.iter().any(|u| u == url) {
            out.push(url.to_string());
        }
    }
    out
}

/// Parses `["query", ["s1", "s2", ...], ...]`. Anything else yields no suggestions.
pub fn parse_opensearch(body: &str) -> Vec<String> {
    let Ok(Value::Array(parts)) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };
    match parts.get(1) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .take(MAX_SUGGESTIONS)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(feature = "network")]
pub use remote::RemoteSuggestions;

#[cfg(feature = "network")]
mod remote {
    use std::time::Duration;

    use log::warn;
    use url::form_urlencoded;

    use super::parse_opensearch;

    pub const DEFAULT_ENDPOINT: &str = "https://duckduckgo.com/ac/?type=list&q=";

    /// Client for a remote suggestion backend.
    pub struct RemoteSuggestions {
        client: reqwest::Client,
        endpoint: String,
        timeout: Duration,
    }

    impl Default for RemoteSuggestions {
        fn default() -> Self {
            Self::new(DEFAULT_ENDPOINT)
        }
    }

    impl RemoteSuggestions {
        /// `endpoint` is a URL prefix the encoded query is appended to.
        pub fn new(endpoint: &str) -> Self {
            Self {
                client: reqwest::Client::new(),
                endpoint: endpoint.to_string(),
                timeout: Duration::from_secs(3),
            }
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        /// Fetches suggestions for `query`. Failures degrade to an empty list.
        pub async fn fetch(&self, query: &str) -> Vec<String> {
            if query.trim().is_empty() {
                return Vec::new();
            }
            match self.try_fetch(query.trim()).await {
                Ok(suggestions) => suggestions,
                Err(e) => {
                    warn!("suggestion backend unavailable: {}", e);
                    Vec::new()
                }
            }
        }

        async fn try_fetch(&self, query: &str) -> Result<Vec<String>, reqwest::Error> {
            let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
            let body = self
                .client
                .get(format!("{}{}", self.endpoint, encoded))
                .timeout(self.timeout)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(parse_opensearch(&body))
        }
    }
}

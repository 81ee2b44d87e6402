//! Offline page snapshots.
//!
//! A snapshot is the page markup fetched once and later handed to the
//! content frame instead of a live URL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfflineSnapshot {
    pub url: String,
    pub html: String,
    pub fetched_at: u64,
}

/// Adds `<base href>` so relative links in the saved markup still resolve.
/// Markup that already declares a base is returned unchanged.
pub fn inject_base_href(html: &str, page_url: &str) -> String {
    let lower = html.to_ascii_lowercase();
    if lower.contains("<base ") || lower.contains("<base>") {
        return html.to_string();
    }
    let escaped = page_url.replace('&', "&amp;").replace('"', "&quot;");
    let tag = format!("<base href=\"{}\">", escaped);

    if let Some(head) = lower.find("<head") {
        if let Some(close) = lower[head..].find('>') {
            let at = head + close + 1;
            return format!("{}{}{}", &html[..at], tag, &html[at..]);
        }
    }
    format!("{}{}", tag, html)
}

#[cfg(feature = "network")]
pub use fetch::fetch_snapshot;

#[cfg(feature = "network")]
mod fetch {
    use log::{info, warn};
    use url::Url;

    use super::{inject_base_href, OfflineSnapshot};
    use crate::types::errors::SnapshotError;

    /// Fetches `url` for offline reading.
    pub async fn fetch_snapshot(
        client: &reqwest::Client,
        url: &str,
        now: u64,
    ) -> Result<OfflineSnapshot, SnapshotError> {
        let parsed = Url::parse(url).map_err(|_| SnapshotError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SnapshotError::InvalidUrl(url.to_string()));
        }

        let response = client.get(parsed).send().await.map_err(|e| {
            warn!("snapshot fetch failed for {}: {}", url, e);
            SnapshotError::Network(e.to_string())
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| SnapshotError::Network(e.to_string()))?;

        info!("saved {} bytes of {} for offline reading", body.len(), url);
        Ok(OfflineSnapshot {
            url: url.to_string(),
            html: inject_base_href(&body, url),
            fetched_at: now,
        })
    }
}

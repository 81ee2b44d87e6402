//! Wraps pages in a translation-proxy URL and unwraps them again.

use url::form_urlencoded;
use url::Url;

use super::url_normalizer::is_internal;

const PROXY_HOST: &str = "translate.google.com";
const PROXY_PATH: &str = "/translate";
const URL_PARAM: &str = "u";

/// Strips any region suffix: `ta-IN` becomes `ta`.
pub fn language_subtag(lang: &str) -> String {
    lang.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Builds a proxy URL that shows `url` translated into `lang`.
/// Internal pages are returned unchanged.
pub fn wrap(url: &str, lang: &str) -> String {
    if is_internal(url) {
        return url.to_string();
    }
    let encoded: String = form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!(
        "https://{}{}?sl=auto&tl={}&{}={}",
        PROXY_HOST,
        PROXY_PATH,
        language_subtag(lang),
        URL_PARAM,
        encoded
    )
}

pub fn is_wrapped(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str() == Some(PROXY_HOST) && parsed.path() == PROXY_PATH,
        Err(_) => false,
    }
}

/// Extracts the embedded page URL. Malformed input comes back unchanged.
pub fn unwrap(url: &str) -> String {
    if !is_wrapped(url) {
        return url.to_string();
    }
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .query_pairs()
                .find(|(key, _)| key == URL_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| url.to_string())
}

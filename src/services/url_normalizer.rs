//! Turns address-bar input into a canonical destination.
//!
//! Input resolves to one of: the internal home page, an internal page left
//! untouched, a direct web URL, or a search-engine query URL. Nothing here
//! fails; every input maps to some destination.

use url::form_urlencoded;
use url::Url;

/// Reserved prefix for app-owned pages. Never sent to the content frame.
pub const INTERNAL_SCHEME: &str = "harbor://";

/// The home sentinel shown in fresh tabs.
pub const HOME_URL: &str = "harbor://home";

/// Search providers whose pages refuse to render in a frame unless asked to.
/// (host, parameter name, parameter value)
const FRAME_COMPAT_PARAMS: &[(&str, &str, &str)] = &[
    ("google.com", "igu", "1"),
    ("www.google.com", "igu", "1"),
];

/// Built-in search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    Bing,
    DuckDuckGo,
    Brave,
    Startpage,
    Ecosia,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 6] = [
        SearchEngine::Google,
        SearchEngine::Bing,
        SearchEngine::DuckDuckGo,
        SearchEngine::Brave,
        SearchEngine::Startpage,
        SearchEngine::Ecosia,
    ];

    /// Resolves a stored engine id. Unknown ids fall back to the default engine.
    pub fn from_id(id: &str) -> SearchEngine {
        Self::ALL
            .into_iter()
            .find(|engine| engine.id().eq_ignore_ascii_case(id.trim()))
            .unwrap_or_default()
    }

    pub fn id(&self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::Bing => "bing",
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Brave => "brave",
            SearchEngine::Startpage => "startpage",
            SearchEngine::Ecosia => "ecosia",
        }
    }

    /// Query template; the encoded query is appended.
    pub fn query_template(&self) -> &'static str {
        match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::Bing => "https://www.bing.com/search?q=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
            SearchEngine::Brave => "https://search.brave.com/search?q=",
            SearchEngine::Startpage => "https://www.startpage.com/do/search?q=",
            SearchEngine::Ecosia => "https://www.ecosia.org/search?q=",
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            SearchEngine::Google => "www.google.com",
            SearchEngine::Bing => "www.bing.com",
            SearchEngine::DuckDuckGo => "duckduckgo.com",
            SearchEngine::Brave => "search.brave.com",
            SearchEngine::Startpage => "www.startpage.com",
            SearchEngine::Ecosia => "www.ecosia.org",
        }
    }

    /// Returns the query text if `url` is a results page of any built-in engine.
    pub fn extract_query(url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        if !Self::ALL.iter().any(|engine| engine.host() == host) {
            return None;
        }
        parsed
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .filter(|q| !q.is_empty())
    }
}

pub fn is_internal(url: &str) -> bool {
    url.starts_with(INTERNAL_SCHEME)
}

fn has_web_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalizes raw address-bar input into a canonical destination.
///
/// A bare input counts as an address when it has a dot and no whitespace;
/// anything else becomes a search. This is a heuristic, not URL validation.
pub fn normalize(raw: Option<&str>, search_engine: &str, https_only: bool) -> String {
    let input = raw.map(str::trim).unwrap_or_default();

    if input.is_empty() {
        return HOME_URL.to_string();
    }

    if is_internal(input) {
        return input.to_string();
    }

    if has_web_scheme(input) {
        let url = if https_only && input[..7].eq_ignore_ascii_case("http://") {
            format!("https://{}", &input[7..])
        } else {
            input.to_string()
        };
        return apply_frame_compat(&url);
    }

    if input.contains('.') && !input.chars().any(char::is_whitespace) {
        return apply_frame_compat(&format!("https://{}", input));
    }

    let engine = SearchEngine::from_id(search_engine);
    let encoded: String = form_urlencoded::byte_serialize(input.as_bytes()).collect();
    apply_frame_compat(&format!("{}{}", engine.query_template(), encoded))
}

/// Injects the provider-specific parameter that lets search-provider pages
/// render inside the content frame. The parameter goes before any fragment.
pub fn apply_frame_compat(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_ascii_lowercase(),
            None => return url.to_string(),
        },
        Err(_) => return url.to_string(),
    };

    let Some(&(_, key, value)) = FRAME_COMPAT_PARAMS.iter().find(|(h, _, _)| *h == host) else {
        return url.to_string();
    };

    let (base, fragment) = match url.find('#') {
        Some(pos) => (&url[..pos], Some(&url[pos..])),
        None => (url, None),
    };

    let query = base.split_once('?').map(|(_, q)| q).unwrap_or("");
    let already_present = form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == key);
    if already_present {
        return url.to_string();
    }

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!("{}{}{}={}{}", base, separator, key, value, fragment.unwrap_or(""))
}

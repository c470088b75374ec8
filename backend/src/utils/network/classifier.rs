use crate::model::ResolverConfig;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Outcome of classifying a shared movie link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    /// The link is playable as is.
    Passthrough(String),
    /// The link has to be opened through the external resolver.
    Redirect(String),
}

impl RewriteDecision {
    pub fn url(&self) -> &str {
        match self {
            RewriteDecision::Passthrough(url) | RewriteDecision::Redirect(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            RewriteDecision::Passthrough(url) | RewriteDecision::Redirect(url) => url,
        }
    }

    pub const fn is_redirect(&self) -> bool {
        matches!(self, RewriteDecision::Redirect(_))
    }
}

/// Decides whether a movie link is handed to the resolver service.
///
/// The rules are checked in order:
/// 1. links already pointing to the resolver stay untouched,
/// 2. links containing a stream marker (`.m3u8`, `cdn`, ...) are redirected,
/// 3. links to a blocked platform (or one of its subdomains) are redirected,
/// 4. everything else passes through.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    resolver_url: String,
    resolver_prefix: String,
    query_param: String,
    stream_markers: Vec<String>,
    blocked_domains: Vec<String>,
}

impl UrlClassifier {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            resolver_url: config.url.clone(),
            resolver_prefix: config.url.to_lowercase(),
            query_param: config.query_param.clone(),
            stream_markers: config.stream_markers.iter().map(|m| m.to_lowercase()).collect(),
            blocked_domains: config.blocked_domains.iter().map(|d| d.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, url: &str) -> RewriteDecision {
        let candidate = url.trim();
        if candidate.is_empty() {
            return RewriteDecision::Passthrough(String::new());
        }
        let lower = candidate.to_lowercase();

        if lower.starts_with(&self.resolver_prefix) {
            return RewriteDecision::Passthrough(candidate.to_string());
        }

        if self.stream_markers.iter().any(|marker| lower.contains(marker.as_str()))
            || self.is_blocked_host(candidate) {
            return RewriteDecision::Redirect(self.resolver_link(candidate));
        }

        RewriteDecision::Passthrough(candidate.to_string())
    }

    fn is_blocked_host(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str().map(str::to_lowercase) else {
            return false;
        };
        self.blocked_domains.iter().any(|domain| {
            host == *domain
                || host.strip_suffix(domain.as_str()).is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn resolver_link(&self, url: &str) -> String {
        let encoded: String = byte_serialize(url.as_bytes()).collect();
        let separator = if self.resolver_url.contains('?') {
            if self.resolver_url.ends_with('?') || self.resolver_url.ends_with('&') { "" } else { "&" }
        } else {
            "?"
        };
        format!("{}{separator}{}={encoded}", self.resolver_url, self.query_param)
    }
}

/// Extracts the link from a chat message like `@movie https://host/film.mp4`.
pub fn parse_movie_command<'a>(message: &'a str, command: &str) -> Option<&'a str> {
    if command.is_empty() {
        return None;
    }
    let rest = message.trim_start().strip_prefix(command)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()
}

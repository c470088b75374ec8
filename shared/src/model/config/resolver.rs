use crate::error::{info_err, MovieChatError};
use crate::utils::{default_blocked_domains, default_resolver_query_param, default_resolver_url, default_stream_markers};

/// Rule table for the movie link rewriter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfigDto {
    /// External resolver endpoint, the original url is appended as query parameter
    #[serde(default = "default_resolver_url")]
    pub url: String,
    #[serde(default = "default_resolver_query_param")]
    pub query_param: String,
    /// Substrings marking streaming containers (playlists, segments, cdn hosts)
    #[serde(default = "default_stream_markers")]
    pub stream_markers: Vec<String>,
    /// Video platforms which block direct embedding
    #[serde(default = "default_blocked_domains")]
    pub blocked_domains: Vec<String>,
}

impl Default for ResolverConfigDto {
    fn default() -> Self {
        Self {
            url: default_resolver_url(),
            query_param: default_resolver_query_param(),
            stream_markers: default_stream_markers(),
            blocked_domains: default_blocked_domains(),
        }
    }
}

impl ResolverConfigDto {
    pub fn prepare(&mut self) -> Result<(), MovieChatError> {
        self.url = self.url.trim().to_string();
        if url::Url::parse(&self.url).is_err() {
            return Err(info_err!("resolver: invalid url '{}'", self.url));
        }
        if self.query_param.trim().is_empty() {
            self.query_param = default_resolver_query_param();
        }
        self.stream_markers = normalize_rules(&self.stream_markers);
        self.blocked_domains = normalize_rules(&self.blocked_domains)
            .into_iter()
            .map(|d| d.trim_start_matches('.').to_string())
            .collect();
        Ok(())
    }
}

fn normalize_rules(rules: &[String]) -> Vec<String> {
    let mut result: Vec<String> = rules.iter()
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .collect();
    result.dedup();
    result
}

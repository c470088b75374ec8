use crate::model::RelayConfig;
use reqwest::StatusCode;
use shared::utils::{sanitize_sensitive_info, CONTENT_TYPE_HLS_MARKER, CONTENT_TYPE_VIDEO_PREFIX};
use std::error::Error;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeCategory {
    Video,
    M3U8,
    Unclassified,
}

pub fn classify_content_type(content_type: &str) -> MimeCategory {
    match content_type.trim().to_lowercase().as_str() {
        v if v.starts_with(CONTENT_TYPE_VIDEO_PREFIX) => MimeCategory::Video,
        v if v.contains(CONTENT_TYPE_HLS_MARKER) => MimeCategory::M3U8,
        _ => MimeCategory::Unclassified,
    }
}

/// Only video containers and HLS playlists are relayed.
pub fn is_relayable_content_type(content_type: &str) -> bool {
    !matches!(classify_content_type(content_type), MimeCategory::Unclassified)
}

pub fn format_http_status(status: StatusCode) -> String {
    let code = status.as_u16();
    match status.canonical_reason() {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}

/// The innermost cause of a request failure, `error sending request` alone says nothing.
pub fn get_error_reason(err: &reqwest::Error) -> String {
    let mut source: &dyn Error = err;
    while let Some(inner) = source.source() {
        source = inner;
    }
    sanitize_sensitive_info(&source.to_string()).into_owned()
}

pub fn create_client(relay_config: &RelayConfig) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .pool_idle_timeout(Duration::from_secs(30))
        .user_agent(relay_config.user_agent.as_str())
        .danger_accept_invalid_certs(relay_config.accept_insecure_ssl_certificates)
}

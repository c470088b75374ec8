use crate::api::api_utils::try_unwrap_body;
use crate::api::model::{ProxyError, RelayStream};
use crate::model::RelayConfig;
use crate::utils::{debug_if_enabled, format_http_status, is_relayable_content_type, ConnectivityProber};
use axum::body::Body;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use shared::utils::{sanitize_sensitive_info, CONTENT_TYPE_MP4};
use url::Url;

pub const HEADER_PROXY_STATUS: &str = "x-proxy-status";

/// Headers every answer of the relay endpoint carries, the player is embedded cross origin.
pub fn relay_cors_headers() -> [(HeaderName, &'static str); 4] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Range"),
        (header::ACCESS_CONTROL_EXPOSE_HEADERS, "Content-Length, Content-Range"),
    ]
}

pub struct StreamingResponse {
    pub content_type: String,
    pub content_length: Option<u64>,
    pub cache_max_age_secs: u64,
    pub body: RelayStream,
}

impl IntoResponse for StreamingResponse {
    fn into_response(self) -> Response {
        let mut builder = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, self.content_type.as_str())
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CACHE_CONTROL, format!("public, max-age={}", self.cache_max_age_secs))
            .header(HEADER_PROXY_STATUS, "success");
        for (name, value) in relay_cors_headers() {
            builder = builder.header(name, value);
        }
        if let Some(content_length) = self.content_length {
            builder = builder.header(header::CONTENT_LENGTH, content_length);
        }
        try_unwrap_body!(builder.body(Body::from_stream(self.body)))
    }
}

/// Fetches a remote media file and hands its body out as a stream.
pub struct MediaRelay {
    client: reqwest::Client,
    prober: ConnectivityProber,
    settings: RelayConfig,
}

fn parse_media_url(url: &str) -> Result<Url, ProxyError> {
    let parsed = Url::parse(url.trim()).map_err(|err| ProxyError::Internal(format!("invalid url: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ProxyError::Internal(format!("unsupported scheme: {scheme}"))),
    }
}

impl MediaRelay {
    pub fn new(client: reqwest::Client, prober: ConnectivityProber, settings: RelayConfig) -> Self {
        Self { client, prober, settings }
    }

    pub async fn relay(&self, url: &str) -> Result<StreamingResponse, ProxyError> {
        let target = parse_media_url(url)?;

        if !self.prober.is_network_reachable().await {
            return Err(ProxyError::NetworkUnavailable);
        }

        let request = self.client.get(target)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .header(CONNECTION, "close");

        let response = match tokio::time::timeout(self.settings.read_timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ProxyError::from(&err)),
            Err(_) => return Err(ProxyError::Timeout),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug_if_enabled!("Relay source {} answered {}", sanitize_sensitive_info(url), format_http_status(status));
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(CONTENT_TYPE_MP4)
            .to_string();
        if !is_relayable_content_type(&content_type) {
            return Err(ProxyError::UnsupportedContentType(content_type));
        }

        let content_length = response.headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let body = RelayStream::new(response.bytes_stream(), self.settings.chunk_size, self.settings.read_timeout, url);

        Ok(StreamingResponse {
            content_type,
            content_length,
            cache_max_age_secs: self.settings.cache_max_age_secs,
            body,
        })
    }
}

use crate::utils::get_error_reason;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::model::ErrorResponse;
use std::fmt::{Display, Formatter};

// 3xx class marker for redirect failures, reqwest does not keep the last redirect status.
const REDIRECT_ERROR_STATUS: u16 = 310;

/// Failure of a relay request, each kind maps to one http status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    NetworkUnavailable,
    ConnectError(String),
    HttpError(u16, String),
    UnsupportedContentType(String),
    UpstreamStatus(u16),
    Timeout,
    Internal(String),
}

impl ProxyError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NetworkUnavailable | ProxyError::ConnectError(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::HttpError(_, _) | ProxyError::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ProxyError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ProxyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyError::NetworkUnavailable => write!(f, "Network connection unavailable"),
            ProxyError::ConnectError(reason) => write!(f, "Failed to connect to the video source: {reason}"),
            ProxyError::HttpError(code, reason) => write!(f, "Video source returned an http error: {code} {reason}"),
            ProxyError::UnsupportedContentType(content_type) => write!(f, "Unsupported content type: {content_type}"),
            ProxyError::UpstreamStatus(code) => write!(f, "Video source responded with status {code}"),
            ProxyError::Timeout => write!(f, "Video source request timed out"),
            ProxyError::Internal(reason) => write!(f, "Internal relay error: {reason}"),
        }
    }
}

impl std::error::Error for ProxyError {}

impl From<&reqwest::Error> for ProxyError {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else if let Some(status) = err.status() {
            ProxyError::HttpError(status.as_u16(), status.canonical_reason().unwrap_or("Unknown").to_string())
        } else if err.is_redirect() {
            ProxyError::HttpError(REDIRECT_ERROR_STATUS, get_error_reason(err))
        } else if err.is_builder() {
            ProxyError::Internal(get_error_reason(err))
        } else {
            ProxyError::ConnectError(get_error_reason(err))
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), axum::Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::NetworkUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ProxyError::ConnectError("refused".to_string()).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ProxyError::HttpError(500, "Internal Server Error".to_string()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ProxyError::UpstreamStatus(404).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ProxyError::UnsupportedContentType("text/html".to_string()).status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(ProxyError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(ProxyError::Internal("boom".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = ProxyError::UpstreamStatus(404).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Video source responded with status 404");
    }
}

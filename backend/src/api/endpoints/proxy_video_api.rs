use crate::api::api_utils::json_error_response;
use crate::api::model::{relay_cors_headers, AppState};
use crate::utils::debug_if_enabled;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use log::{info, warn};
use serde::Deserialize;
use shared::utils::{sanitize_sensitive_info, truncate_string};
use std::sync::Arc;

const LOG_URL_LEN: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ProxyVideoParams {
    #[serde(default)]
    url: Option<String>,
}

async fn proxy_video(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<ProxyVideoParams>, QueryRejection>,
) -> impl IntoResponse + Send {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            debug_if_enabled!("Rejected relay query: {}", rejection.body_text());
            return (relay_cors_headers(), json_error_response(StatusCode::BAD_REQUEST, "Invalid url parameter")).into_response();
        }
    };
    let url = params.url.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return (relay_cors_headers(), json_error_response(StatusCode::BAD_REQUEST, "Missing url parameter")).into_response();
    }

    let log_url = truncate_string(&sanitize_sensitive_info(url), LOG_URL_LEN);
    info!("Relaying video {log_url}");

    match app_state.relay.relay(url).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            warn!("Relay of {log_url} failed: {err}");
            (relay_cors_headers(), err).into_response()
        }
    }
}

async fn proxy_video_preflight() -> impl IntoResponse + Send {
    (StatusCode::NO_CONTENT, relay_cors_headers()).into_response()
}

pub fn proxy_video_api_register() -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/proxy-video", axum::routing::get(proxy_video).options(proxy_video_preflight))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{create_test_app_state, spawn_app, spawn_upstream, video_bytes, BROKEN_WRITE_SIZE, VIDEO_SIZE};
    use reqwest::StatusCode;
    use shared::model::ErrorResponse;
    use std::time::Duration;

    fn proxy_url(app: std::net::SocketAddr, target: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!("http://{app}/proxy-video?url={encoded}")
    }

    #[tokio::test]
    async fn test_missing_url_is_bad_request_without_probe() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        for query in ["", "?url=", "?url=%20%20"] {
            let response = reqwest::get(format!("http://{app}/proxy-video{query}")).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
            let error: ErrorResponse = response.json().await.unwrap();
            assert!(!error.error.is_empty());
        }
        assert_eq!(upstream.probes(), 0);
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_malformed_query_is_json_bad_request() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let response = reqwest::get(format!("http://{app}/proxy-video?url=a&url=b")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert!(response.headers()["content-type"].to_str().unwrap().starts_with("application/json"));
        let error: ErrorResponse = response.json().await.unwrap();
        assert!(!error.error.is_empty());
        assert_eq!(upstream.probes(), 0);
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_redirect_loop_is_bad_gateway() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let response = reqwest::get(proxy_url(app, &upstream.url("/loop.mp4"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let error: ErrorResponse = response.json().await.unwrap();
        assert!(error.error.contains("http error"));
    }

    #[tokio::test]
    async fn test_source_failing_mid_stream_ends_body_cleanly() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let response = reqwest::get(proxy_url(app, &upstream.url("/broken.mp4"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "video/mp4");
        let body = response.bytes().await.unwrap();
        assert_eq!(body.len(), 2 * BROKEN_WRITE_SIZE);
        assert!(body[..BROKEN_WRITE_SIZE].iter().all(|b| *b == 7));
        assert!(body[BROKEN_WRITE_SIZE..].iter().all(|b| *b == 8));
        assert_eq!(upstream.hits(), 1);
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;

        let response = reqwest::get(proxy_url(app, &upstream.url("/missing.mp4"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let error: ErrorResponse = response.json().await.unwrap();
        assert!(error.error.contains("404"));

        let response = reqwest::get(proxy_url(app, &upstream.url("/page"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let response = reqwest::get(proxy_url(app, "gopher://host/film.mp4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unreachable_network_is_service_unavailable() {
        let upstream = spawn_upstream().await;
        let probe = crate::api::test_support::closed_port().await;
        let app = spawn_app(create_test_app_state(&format!("http://{probe}/"), 5)).await;
        let response = reqwest::get(proxy_url(app, &upstream.url("/video.mp4"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_video_is_streamed_with_headers() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let response = reqwest::get(proxy_url(app, &upstream.url("/video.mp4"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["content-type"], "video/mp4");
        assert_eq!(headers["content-length"], VIDEO_SIZE.to_string().as_str());
        assert_eq!(headers["accept-ranges"], "bytes");
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["cache-control"], "public, max-age=3600");
        assert_eq!(headers["x-proxy-status"], "success");
        let body = response.bytes().await.unwrap();
        assert!(body == video_bytes());
    }

    #[tokio::test]
    async fn test_preflight() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{app}/proxy-video"))
            .send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["access-control-allow-methods"], "GET, OPTIONS");
    }

    #[tokio::test]
    async fn test_client_disconnect_releases_the_source() {
        let upstream = spawn_upstream().await;
        let app = spawn_app(create_test_app_state(&upstream.url("/probe"), 5)).await;
        let mut response = reqwest::get(proxy_url(app, &upstream.url("/endless.ts"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.chunk().await.unwrap().is_some());
        drop(response);
        let released = tokio::time::timeout(Duration::from_secs(5), upstream.state.released.notified()).await;
        assert!(released.is_ok());
    }
}

use crate::api::main_api::create_router;
use crate::api::model::AppState;
use crate::api::serve::serve;
use crate::model::{AppConfig, Config};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use bytes::Bytes;
use shared::model::{ConfigDto, ConfigPaths};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub const VIDEO_SIZE: usize = 10 * 1024 * 1024;
const VIDEO_WRITE_SIZE: usize = 7_000;
pub const BROKEN_WRITE_SIZE: usize = 1_000;

pub struct UpstreamState {
    pub hits: AtomicUsize,
    pub probes: AtomicUsize,
    pub released: Notify,
    pub video: Bytes,
}

pub struct Upstream {
    pub addr: SocketAddr,
    pub state: Arc<UpstreamState>,
}

impl Upstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn probes(&self) -> usize {
        self.state.probes.load(Ordering::SeqCst)
    }
}

struct ReleaseGuard(Arc<UpstreamState>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.released.notify_one();
    }
}

pub fn video_bytes() -> Bytes {
    #[allow(clippy::cast_possible_truncation)]
    let data: Vec<u8> = (0..VIDEO_SIZE).map(|i| (i % 251) as u8).collect();
    Bytes::from(data)
}

async fn probe(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.probes.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn video(State(state): State<Arc<UpstreamState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let video = state.video.clone();
    let writes = (0..video.len()).step_by(VIDEO_WRITE_SIZE)
        .map(move |start| Ok::<_, std::io::Error>(video.slice(start..(start + VIDEO_WRITE_SIZE).min(VIDEO_SIZE))));
    Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, VIDEO_SIZE)
        .body(Body::from_stream(futures::stream::iter(writes)))
        .unwrap()
}

async fn missing(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::NOT_FOUND, "not here")
}

async fn page(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], "<html></html>")
}

async fn playlist(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "application/vnd.apple.mpegurl")], "#EXTM3U\n")
}

async fn slow(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    StatusCode::OK
}

async fn endless(State(state): State<Arc<UpstreamState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let guard = ReleaseGuard(Arc::clone(&state));
    let stream = futures::stream::unfold(guard, |guard| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Some((Ok::<_, std::io::Error>(Bytes::from(vec![1u8; 16 * 1024])), guard))
    });
    Response::builder()
        .header(header::CONTENT_TYPE, "video/mp2t")
        .body(Body::from_stream(stream))
        .unwrap()
}

async fn broken(State(state): State<Arc<UpstreamState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let writes = vec![
        Ok(Bytes::from(vec![7u8; BROKEN_WRITE_SIZE])),
        Ok(Bytes::from(vec![8u8; BROKEN_WRITE_SIZE])),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "source went away")),
    ];
    Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .body(Body::from_stream(futures::stream::iter(writes)))
        .unwrap()
}

async fn redirect_loop(State(state): State<Arc<UpstreamState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::FOUND, [(header::LOCATION, "/loop.mp4")])
}

pub async fn spawn_router(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub async fn spawn_upstream() -> Upstream {
    let state = Arc::new(UpstreamState {
        hits: AtomicUsize::new(0),
        probes: AtomicUsize::new(0),
        released: Notify::new(),
        video: video_bytes(),
    });
    let router = axum::Router::new()
        .route("/probe", get(probe))
        .route("/video.mp4", get(video))
        .route("/missing.mp4", get(missing))
        .route("/page", get(page))
        .route("/live.m3u8", get(playlist))
        .route("/slow.mp4", get(slow))
        .route("/endless.ts", get(endless))
        .route("/broken.mp4", get(broken))
        .route("/loop.mp4", get(redirect_loop))
        .with_state(Arc::clone(&state));
    let addr = spawn_router(router).await;
    Upstream { addr, state }
}

/// Address of a port nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn create_test_app_state(probe_url: &str, read_timeout_secs: u64) -> Arc<AppState> {
    let mut dto = ConfigDto::default();
    dto.relay.probe_url = probe_url.to_string();
    dto.relay.probe_timeout_secs = 1;
    dto.relay.connect_timeout_secs = 2;
    dto.relay.read_timeout_secs = read_timeout_secs;
    dto.api.web_root = std::env::temp_dir().join("moviechat-missing-web-root").to_string_lossy().to_string();
    dto.prepare().unwrap();
    let app_config = Arc::new(AppConfig {
        config: Arc::new(Config::from(dto)),
        paths: ConfigPaths {
            config_path: String::new(),
            config_file_path: String::new(),
        },
    });
    Arc::new(AppState::new(&app_config))
}

pub async fn spawn_app(app_state: Arc<AppState>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = create_router(app_state);
    tokio::spawn(async move {
        serve(listener, router, None).await;
    });
    addr
}

use crate::api::api_utils::{get_build_time, get_server_time};
use crate::api::endpoints::chat_api::chat_api_register;
use crate::api::endpoints::proxy_video_api::proxy_video_api_register;
use crate::api::endpoints::web_index::index_register;
use crate::api::endpoints::websocket_api::ws_api_register;
use crate::api::model::AppState;
use crate::api::serve::serve;
use crate::model::AppConfig;
use crate::VERSION;
use log::{error, info, warn};
use shared::model::Healthcheck;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn get_web_dir_path(web_root: &str) -> PathBuf {
    let web_dir_path = PathBuf::from(web_root);
    if !web_dir_path.is_dir() {
        warn!("web_root does not exists or is not an directory: {}", web_dir_path.display());
    }
    web_dir_path
}

fn create_healthcheck() -> Healthcheck {
    Healthcheck {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        build_time: get_build_time(),
        server_time: get_server_time(),
    }
}

async fn healthcheck() -> impl axum::response::IntoResponse {
    axum::Json(create_healthcheck())
}

fn create_cors_layer() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
            axum::http::Method::HEAD,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(std::time::Duration::from_secs(3600))
}

/// The relay endpoint is merged after the cors layer, it sets its own headers.
pub fn create_router(app_state: Arc<AppState>) -> axum::Router<()> {
    let web_dir_path = get_web_dir_path(&app_state.app_config.config.api.web_root);
    axum::Router::new()
        .route("/healthcheck", axum::routing::get(healthcheck))
        .merge(ws_api_register())
        .merge(chat_api_register())
        .merge(index_register(&web_dir_path))
        .layer(create_cors_layer())
        .merge(proxy_video_api_register())
        .with_state(app_state)
}

fn exec_shutdown_signal(cancel_token: &CancellationToken) {
    let token = cancel_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested"),
            Err(err) => error!("Failed to listen for the shutdown signal: {err}"),
        }
        token.cancel();
    });
}

pub async fn start_server(app_config: Arc<AppConfig>) -> std::io::Result<()> {
    let host = app_config.config.api.host.clone();
    let port = app_config.config.api.port;

    let app_state = Arc::new(AppState::new(&app_config));
    let router = create_router(Arc::clone(&app_state));

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server running: http://{host}:{port}");
    info!("Chat room: {}", app_state.chat_room.name());

    let cancel_token = CancellationToken::new();
    exec_shutdown_signal(&cancel_token);
    serve(listener, router, Some(cancel_token)).await;
    info!("Server stopped");
    Ok(())
}

use crate::api::api_utils::json_response;
use crate::api::model::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use shared::model::{NicknameCheckRequest, NicknameCheckResponse, ServerListResponse};
use std::sync::Arc;

async fn check_nickname(
    State(app_state): State<Arc<AppState>>,
    axum::extract::Json(req): axum::extract::Json<NicknameCheckRequest>,
) -> impl IntoResponse + Send {
    let valid = match req.nickname.as_deref() {
        Some(nickname) => app_state.chat_room.is_nickname_available(nickname).await,
        None => false,
    };
    json_response(&NicknameCheckResponse { valid })
}

async fn servers(State(app_state): State<Arc<AppState>>) -> impl IntoResponse + Send {
    json_response(&ServerListResponse {
        servers: app_state.app_config.config.servers.clone(),
    })
}

pub fn chat_api_register() -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/api/check_nickname", axum::routing::post(check_nickname))
        .route("/api/servers", axum::routing::get(servers))
}

use crate::api::api_utils::{redirect, serve_file};
use crate::api::model::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LOGIN_PAGE: &str = "login.html";
const CHAT_PAGE: &str = "index.html";
const STATIC_DIR: &str = "static";

fn web_root(app_state: &AppState) -> PathBuf {
    PathBuf::from(&app_state.app_config.config.api.web_root)
}

async fn index() -> impl IntoResponse + Send {
    redirect("/login")
}

async fn login(State(app_state): State<Arc<AppState>>) -> impl IntoResponse + Send {
    serve_file(&web_root(&app_state).join(LOGIN_PAGE), mime::TEXT_HTML_UTF_8).await.into_response()
}

async fn chat(State(app_state): State<Arc<AppState>>) -> impl IntoResponse + Send {
    serve_file(&web_root(&app_state).join(CHAT_PAGE), mime::TEXT_HTML_UTF_8).await.into_response()
}

pub fn index_register(web_dir_path: &Path) -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/", axum::routing::get(index))
        .route("/login", axum::routing::get(login))
        .route("/chat", axum::routing::get(chat))
        .nest_service("/static", tower_http::services::ServeDir::new(web_dir_path.join(STATIC_DIR)))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{create_test_app_state, spawn_app};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_root_redirects_to_login() {
        let app = spawn_app(create_test_app_state("http://127.0.0.1:9/", 5)).await;
        let client = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap();
        let response = client.get(format!("http://{app}/")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let app = spawn_app(create_test_app_state("http://127.0.0.1:9/", 5)).await;
        let response = reqwest::get(format!("http://{app}/chat")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

use crate::utils::file_reader;
use crate::BUILD_TIMESTAMP;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use log::error;
use serde::Serialize;
use shared::model::ErrorResponse;
use std::io::Read;
use std::path::Path;

#[macro_export]
macro_rules! try_unwrap_body {
    ($body:expr) => {
        $body.map_or_else(
            |_| axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            |resp| resp.into_response(),
        )
    };
}

pub use try_unwrap_body;

pub fn get_server_time() -> String {
    chrono::offset::Local::now()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}

pub fn get_build_time() -> Option<String> {
    BUILD_TIMESTAMP?
        .parse::<DateTime<Utc>>()
        .ok()
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string())
}

pub async fn serve_file(file_path: &Path, mime_type: mime::Mime) -> impl IntoResponse + Send {
    match tokio::fs::try_exists(file_path).await {
        Ok(true) => {}
        Ok(false) => return StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to open file {}, {err:?}", file_path.display());
            return StatusCode::NOT_FOUND.into_response();
        }
    }

    let path = file_path.to_path_buf();
    let content = tokio::task::spawn_blocking(move || {
        let mut content = Vec::new();
        std::fs::File::open(&path).and_then(|file| file_reader(file).read_to_end(&mut content)).map(|_| content)
    }).await;

    match content {
        Ok(Ok(content)) => try_unwrap_body!(axum::response::Response::builder()
            .status(StatusCode::OK)
            .header(axum::http::header::CONTENT_TYPE, mime_type.to_string())
            .header(
                axum::http::header::CACHE_CONTROL,
                axum::http::header::HeaderValue::from_static("no-cache")
            )
            .body(axum::body::Body::from(content))),
        Ok(Err(err)) => {
            error!("Failed to read file {}, {err}", file_path.display());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(err) => {
            error!("Failed to read file {}, {err}", file_path.display());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn redirect(url: &str) -> impl IntoResponse {
    try_unwrap_body!(axum::response::Response::builder()
        .status(StatusCode::FOUND)
        .header(axum::http::header::LOCATION, url)
        .body(axum::body::Body::empty()))
}

pub fn json_response<T: Serialize>(data: &T) -> impl IntoResponse + Send {
    (StatusCode::OK, axum::Json(data)).into_response()
}

pub fn json_error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, axum::Json(ErrorResponse::new(message))).into_response()
}

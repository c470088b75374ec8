pub mod chat_api;
pub mod proxy_video_api;
pub mod web_index;
pub mod websocket_api;

use crate::api::model::{ChatRoom, MediaRelay};
use crate::model::{AppConfig, RelayConfig};
use crate::utils::{create_client, ConnectivityProber, UrlClassifier};
use log::error;
use reqwest::Client;
use std::sync::Arc;

pub fn create_http_client(relay_config: &RelayConfig) -> Client {
    // a relayed connection is never reused, it is closed with the response
    create_client(relay_config)
        .http1_only()
        .pool_max_idle_per_host(0)
        .connect_timeout(relay_config.connect_timeout)
        .build()
        .unwrap_or_else(|err| {
            error!("Failed to build relay client {err}");
            Client::new()
        })
}

#[derive(Clone)]
pub struct AppState {
    pub app_config: Arc<AppConfig>,
    pub relay: Arc<MediaRelay>,
    pub classifier: Arc<UrlClassifier>,
    pub chat_room: Arc<ChatRoom>,
}

impl AppState {
    pub fn new(app_config: &Arc<AppConfig>) -> Self {
        let config = &app_config.config;
        let relay = MediaRelay::new(
            create_http_client(&config.relay),
            ConnectivityProber::new(&config.relay),
            config.relay.clone(),
        );
        Self {
            app_config: Arc::clone(app_config),
            relay: Arc::new(relay),
            classifier: Arc::new(UrlClassifier::new(&config.resolver)),
            chat_room: Arc::new(ChatRoom::new(&config.chat.room)),
        }
    }
}

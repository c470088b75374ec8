use crate::model::RelayConfig;
use crate::utils::{create_client, debug_if_enabled, get_error_reason};
use log::error;
use reqwest::Client;
use std::time::Duration;

/// Cheap outbound reachability check done before every relay request.
#[derive(Debug, Clone)]
pub struct ConnectivityProber {
    client: Client,
    probe_url: String,
    timeout: Duration,
}

impl ConnectivityProber {
    pub fn new(relay_config: &RelayConfig) -> Self {
        let client = create_client(relay_config)
            .timeout(relay_config.probe_timeout)
            .connect_timeout(relay_config.probe_timeout)
            .build()
            .unwrap_or_else(|err| {
                error!("Failed to build probe client {err}");
                Client::new()
            });
        Self {
            client,
            probe_url: relay_config.probe_url.clone(),
            timeout: relay_config.probe_timeout,
        }
    }

    /// Any http answer counts as reachable, the status is irrelevant.
    pub async fn is_network_reachable(&self) -> bool {
        match tokio::time::timeout(self.timeout, self.client.head(&self.probe_url).send()).await {
            Ok(Ok(response)) => {
                debug_if_enabled!("Connectivity probe {} answered {}", self.probe_url, response.status());
                true
            }
            Ok(Err(err)) => {
                debug_if_enabled!("Connectivity probe {} failed: {}", self.probe_url, get_error_reason(&err));
                false
            }
            Err(_) => {
                debug_if_enabled!("Connectivity probe {} timed out", self.probe_url);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::net::SocketAddr;

    async fn spawn_server(router: axum::Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    async fn closed_port() -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    fn prober_for(url: String) -> ConnectivityProber {
        ConnectivityProber::new(&RelayConfig {
            probe_url: url,
            probe_timeout: Duration::from_secs(2),
            ..RelayConfig::default()
        })
    }

    #[tokio::test]
    async fn test_reachable_with_any_status() {
        let addr = spawn_server(axum::Router::new().route("/", get(|| async { StatusCode::NOT_FOUND }))).await;
        assert!(prober_for(format!("http://{addr}/")).is_network_reachable().await);
    }

    #[tokio::test]
    async fn test_unreachable_when_nothing_listens() {
        let addr = closed_port().await;
        assert!(!prober_for(format!("http://{addr}/")).is_network_reachable().await);
    }

    #[tokio::test]
    async fn test_unreachable_on_timeout() {
        let addr = spawn_server(axum::Router::new().route("/", get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            StatusCode::OK
        }))).await;
        let prober = ConnectivityProber::new(&RelayConfig {
            probe_url: format!("http://{addr}/"),
            probe_timeout: Duration::from_millis(300),
            ..RelayConfig::default()
        });
        let started = std::time::Instant::now();
        assert!(!prober.is_network_reachable().await);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

use crate::model::config::macros;
use shared::model::RelayConfigDto;
use std::time::Duration;

/// Runtime settings of the media relay, timeouts already converted.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub probe_url: String,
    pub probe_timeout: Duration,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub chunk_size: usize,
    pub user_agent: String,
    pub cache_max_age_secs: u64,
    pub accept_insecure_ssl_certificates: bool,
}

macros::from_impl!(RelayConfig);
impl From<&RelayConfigDto> for RelayConfig {
    fn from(dto: &RelayConfigDto) -> Self {
        Self {
            probe_url: dto.probe_url.clone(),
            probe_timeout: Duration::from_secs(dto.probe_timeout_secs),
            connect_timeout: Duration::from_secs(dto.connect_timeout_secs),
            read_timeout: Duration::from_secs(dto.read_timeout_secs),
            chunk_size: dto.chunk_size.max(1),
            user_agent: dto.user_agent.clone(),
            cache_max_age_secs: dto.cache_max_age_secs,
            accept_insecure_ssl_certificates: dto.accept_insecure_ssl_certificates,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from(RelayConfigDto::default())
    }
}

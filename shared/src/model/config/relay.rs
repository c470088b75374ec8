use crate::error::{info_err, MovieChatError};
use crate::utils::{default_as_true, default_cache_max_age_secs, default_chunk_size, default_connect_timeout_secs,
                   default_probe_timeout_secs, default_probe_url, default_read_timeout_secs, default_user_agent};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RelayConfigDto {
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
    // Media hosts are not under our control, certificate errors are tolerated unless switched off.
    #[serde(default = "default_as_true")]
    pub accept_insecure_ssl_certificates: bool,
}

impl Default for RelayConfigDto {
    fn default() -> Self {
        Self {
            probe_url: default_probe_url(),
            probe_timeout_secs: default_probe_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            chunk_size: default_chunk_size(),
            user_agent: default_user_agent(),
            cache_max_age_secs: default_cache_max_age_secs(),
            accept_insecure_ssl_certificates: default_as_true(),
        }
    }
}

impl RelayConfigDto {
    pub fn prepare(&mut self) -> Result<(), MovieChatError> {
        self.probe_url = self.probe_url.trim().to_string();
        if url::Url::parse(&self.probe_url).is_err() {
            return Err(info_err!("relay: invalid probe_url '{}'", self.probe_url));
        }
        if self.chunk_size == 0 {
            return Err(info_err!("relay: chunk_size must be greater than 0"));
        }
        if self.probe_timeout_secs == 0 || self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(info_err!("relay: timeouts must be greater than 0"));
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = default_user_agent();
        }
        Ok(())
    }
}

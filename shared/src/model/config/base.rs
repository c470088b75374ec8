use crate::error::MovieChatError;
use crate::model::{ChatConfigDto, ConfigApiDto, LogConfigDto, RelayConfigDto, ResolverConfigDto};
use crate::utils::default_servers;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigDto {
    #[serde(default)]
    pub api: ConfigApiDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfigDto>,
    #[serde(default)]
    pub relay: RelayConfigDto,
    #[serde(default)]
    pub resolver: ResolverConfigDto,
    #[serde(default)]
    pub chat: ChatConfigDto,
    /// Chat servers offered on the login page
    #[serde(default)]
    pub servers: Vec<String>,
}

impl ConfigDto {
    pub fn prepare(&mut self) -> Result<(), MovieChatError> {
        self.api.prepare();
        if let Some(log) = self.log.as_mut() {
            log.clean();
        }
        self.relay.prepare()?;
        self.resolver.prepare()?;
        self.chat.prepare();
        self.servers.retain(|s| !s.trim().is_empty());
        if self.servers.is_empty() {
            self.servers = default_servers();
        }
        Ok(())
    }
}

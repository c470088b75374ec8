use crate::model::config::macros;
use crate::model::{ChatConfig, ConfigApi, RelayConfig, ResolverConfig};
use shared::model::ConfigDto;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ConfigApi,
    pub relay: RelayConfig,
    pub resolver: ResolverConfig,
    pub chat: ChatConfig,
    pub servers: Vec<String>,
}

macros::from_impl!(Config);
impl From<&ConfigDto> for Config {
    fn from(dto: &ConfigDto) -> Self {
        Self {
            api: ConfigApi::from(&dto.api),
            relay: RelayConfig::from(&dto.relay),
            resolver: ResolverConfig::from(&dto.resolver),
            chat: ChatConfig::from(&dto.chat),
            servers: dto.servers.clone(),
        }
    }
}

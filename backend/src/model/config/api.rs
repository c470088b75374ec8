use shared::model::ConfigApiDto;
use crate::model::config::macros;

#[derive(Debug, Clone, Default)]
pub struct ConfigApi {
    pub host: String,
    pub port: u16,
    pub web_root: String,
}

macros::from_impl!(ConfigApi);
impl From<&ConfigApiDto> for ConfigApi {
    fn from(dto: &ConfigApiDto) -> Self {
        Self {
            host: dto.host.clone(),
            port: dto.port,
            web_root: dto.web_root.clone(),
        }
    }
}

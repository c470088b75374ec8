use crate::model::config::macros;
use shared::model::ResolverConfigDto;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub url: String,
    pub query_param: String,
    pub stream_markers: Vec<String>,
    pub blocked_domains: Vec<String>,
}

macros::from_impl!(ResolverConfig);
impl From<&ResolverConfigDto> for ResolverConfig {
    fn from(dto: &ResolverConfigDto) -> Self {
        Self {
            url: dto.url.clone(),
            query_param: dto.query_param.clone(),
            stream_markers: dto.stream_markers.clone(),
            blocked_domains: dto.blocked_domains.clone(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from(ResolverConfigDto::default())
    }
}

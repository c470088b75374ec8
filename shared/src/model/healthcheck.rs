use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Healthcheck {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_time: Option<String>,
    pub server_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthcheckConfigDto {
    #[serde(default)]
    pub api: crate::model::ConfigApiDto,
}

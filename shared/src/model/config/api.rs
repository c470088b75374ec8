use crate::utils::{default_host, default_port, default_web_root};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigApiDto {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub web_root: String,
}

impl Default for ConfigApiDto {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
        }
    }
}

impl ConfigApiDto {
    pub fn prepare(&mut self) {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.web_root.trim().is_empty() {
            self.web_root = default_web_root();
        }
    }
}

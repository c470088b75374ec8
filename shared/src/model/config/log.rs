use crate::utils::{default_as_true, is_blank_optional_string};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfigDto {
    #[serde(default = "default_as_true")]
    pub sanitize_sensitive_info: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for LogConfigDto {
    fn default() -> Self {
        LogConfigDto {
            sanitize_sensitive_info: default_as_true(),
            log_level: None,
        }
    }
}

impl LogConfigDto {
    pub fn clean(&mut self) {
        if is_blank_optional_string(&self.log_level) {
            self.log_level = None;
        }
    }
}

/// Partial view of the config file, only used to pick up the log level before the full config is read.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LogLevelConfigDto {
    pub log: Option<LogConfigDto>,
}

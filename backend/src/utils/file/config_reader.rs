use crate::model::{AppConfig, Config};
use crate::utils::{file_reader, path_exists};
use log::{error, warn};
use shared::error::{info_err, MovieChatError};
use shared::model::{ConfigDto, ConfigPaths};
use shared::utils::{set_sanitize_sensitive_info, CONSTANTS};
use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

/// Reads a yaml config file and replaces `${env:NAME}` placeholders.
pub fn read_config_file(path: &Path) -> io::Result<String> {
    let mut content = String::new();
    file_reader(File::open(path)?).read_to_string(&mut content)?;
    Ok(resolve_env_var(&content))
}

fn parse_config(content: &str) -> Result<ConfigDto, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ConfigDto::default());
    }
    serde_yaml::from_str(content)
}

pub fn read_config(paths: &ConfigPaths) -> Result<AppConfig, MovieChatError> {
    let config_file = paths.config_file_path.as_str();
    let path = Path::new(config_file);

    let mut config_dto = if path_exists(path) {
        let content = read_config_file(path)
            .map_err(|err| info_err!("Can't read the config file: {config_file}: {err}"))?;
        parse_config(&content)
            .map_err(|err| info_err!("Can't read the config file: {config_file}: {err}"))?
    } else {
        warn!("Config file {config_file} not found, using defaults");
        ConfigDto::default()
    };
    config_dto.prepare()?;

    set_sanitize_sensitive_info(config_dto.log.as_ref().is_none_or(|l| l.sanitize_sensitive_info));

    Ok(AppConfig {
        config: Arc::new(Config::from(config_dto)),
        paths: paths.clone(),
    })
}

pub fn resolve_env_var(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    CONSTANTS.re_env_var.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|e| {
            error!("Could not resolve env var '{var_name}': {e}");
            format!("${{env:{var_name}}}")
        })
    }).to_string()
}

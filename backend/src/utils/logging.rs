use crate::utils::read_config_file;
use env_logger::{Builder, Target};
use log::{error, info, LevelFilter};
use shared::model::LogLevelConfigDto;
use std::path::Path;

const LOG_ERROR_LEVEL_MOD: &[&str] = &[
    "reqwest::async_impl::client",
    "reqwest::connect",
    "hyper_util::client",
    "tungstenite::protocol"
];

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

fn read_config_log_level(config_file: &str) -> Option<String> {
    let content = read_config_file(Path::new(config_file)).ok()?;
    serde_yaml::from_str::<LogLevelConfigDto>(&content)
        .map_err(|e| error!("Failed to parse log config file: {e}"))
        .ok()
        .and_then(|cfg| cfg.log.and_then(|l| l.log_level))
}

/// Parses `info` or `warn,moviechat::api=debug` style level definitions.
fn parse_log_levels(log_level: &str) -> (Option<LevelFilter>, Vec<(String, LevelFilter)>) {
    let mut default_level = None;
    let mut module_levels = vec![];
    for pair in log_level.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((module, level)) = pair.split_once('=') {
            module_levels.push((module.trim().to_string(), get_log_level(level)));
        } else {
            default_level = Some(get_log_level(pair));
        }
    }
    (default_level, module_levels)
}

pub fn init_logger(user_log_level: Option<&String>, config_file: &str) {
    let env_log_level = std::env::var("MOVIECHAT_LOG").ok();

    let mut log_builder = Builder::from_default_env();
    log_builder.target(Target::Stdout);

    // priority  CLI-Argument, Env-Var, Config, Default
    let log_level = user_log_level
        .map(std::string::ToString::to_string)
        .or(env_log_level)
        .or_else(|| read_config_log_level(config_file))
        .unwrap_or_else(|| "info".to_string());

    let (default_level, module_levels) = parse_log_levels(&log_level);
    let mut log_levels = vec![];
    if let Some(level) = default_level {
        log_builder.filter_level(level);
        log_levels.push(level.to_string());
    }
    for (module, level) in module_levels {
        log_levels.push(format!("{module}={level}"));
        log_builder.filter_module(&module, level);
    }
    for module in LOG_ERROR_LEVEL_MOD {
        log_builder.filter_module(module, LevelFilter::Error);
    }
    log_builder.init();
    info!("Log Level {}", &log_levels.join(", "));
}

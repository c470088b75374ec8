#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod modules;

include_modules!();

use crate::model::AppConfig;
use crate::utils::{init_logger, read_config_file, resolve_env_var};
use clap::Parser;
use log::{error, info};
use shared::model::{ConfigPaths, Healthcheck, HealthcheckConfigDto};
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moviechat")]
#[command(version)]
#[command(about = "Chat room with a streaming movie relay", long_about = None)]
struct Args {
    /// The config directory
    #[arg(short = 'p', long = "config-path")]
    config_path: Option<String>,

    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// log level
    #[arg(short = 'l', long = "log-level", default_missing_value = "info")]
    log_level: Option<String>,

    #[arg(short = None, long = "healthcheck", default_value_t = false, default_missing_value = "true"
    )]
    healthcheck: bool,
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_TIMESTAMP: Option<&str> = option_env!("VERGEN_BUILD_TIMESTAMP");

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config_paths = get_file_paths(&args);

    init_logger(args.log_level.as_ref(), config_paths.config_file_path.as_str());

    if args.healthcheck {
        let healthy = healthcheck(config_paths.config_file_path.as_str()).await;
        std::process::exit(i32::from(!healthy));
    }

    info!("Version: {VERSION}");
    if let Some(bts) = api::api_utils::get_build_time() {
        info!("Build time: {bts}");
    }
    let app_config = utils::read_config(&config_paths).unwrap_or_else(|err| exit!("{}", err));
    print_info(&app_config);

    if let Err(err) = api::main_api::start_server(Arc::new(app_config)).await {
        exit!("Can't start server: {err}");
    }
}

fn print_info(app_config: &AppConfig) {
    let config = &app_config.config;
    info!("Current time: {}", chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("Config dir: {:?}", &app_config.paths.config_path);
    info!("Config file: {:?}", &app_config.paths.config_file_path);
    info!("Web root: {:?}", &config.api.web_root);
    info!("Resolver: {}", &config.resolver.url);
    info!("Connectivity probe: {}", &config.relay.probe_url);
}

fn get_file_paths(args: &Args) -> ConfigPaths {
    let config_path: String = utils::resolve_directory_path(&resolve_env_var(&args.config_path.as_ref().map_or_else(utils::get_default_config_path, ToString::to_string)));
    let config_file: String = resolve_env_var(&args.config_file.as_ref().map_or_else(|| utils::get_default_config_file_path(&config_path), ToString::to_string));

    ConfigPaths {
        config_path,
        config_file_path: config_file,
    }
}

async fn healthcheck(config_file: &str) -> bool {
    let config = match read_config_file(Path::new(config_file)) {
        Ok(content) => match serde_yaml::from_str::<HealthcheckConfigDto>(&content) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to parse config file for healthcheck {err:?}");
                return false;
            }
        },
        // without a config file the server runs on the default port
        Err(_) => HealthcheckConfigDto { api: shared::model::ConfigApiDto::default() },
    };

    match reqwest::Client::new()
        .get(format!("http://localhost:{}/healthcheck", config.api.port))
        .send()
        .await
    {
        Ok(response) => matches!(response.json::<Healthcheck>().await, Ok(check) if check.status == "ok"),
        Err(_) => false,
    }
}

use crate::model::Config;
use shared::model::ConfigPaths;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config: Arc<Config>,
    pub paths: ConfigPaths,
}

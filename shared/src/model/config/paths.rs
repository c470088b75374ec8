#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConfigPaths {
    pub config_path: String,
    pub config_file_path: String,
}

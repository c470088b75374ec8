use log::error;
use shared::utils::{CONFIG_FILE, CONFIG_PATH};
use std::fs;
use std::path::{Path, PathBuf};

pub const IO_BUFFER_SIZE: usize = 64 * 1024;

pub fn file_reader<R>(r: R) -> std::io::BufReader<R>
where
    R: std::io::Read,
{
    std::io::BufReader::with_capacity(IO_BUFFER_SIZE, r)
}

pub fn get_exe_path() -> PathBuf {
    let default_path = std::path::PathBuf::from("./");
    let current_exe = std::env::current_exe();
    match current_exe {
        Ok(exe) => {
            match fs::read_link(&exe) {
                Ok(f) => f.parent().map_or(default_path, std::path::Path::to_path_buf),
                Err(_) => exe.parent().map_or(default_path, std::path::Path::to_path_buf)
            }
        }
        Err(_) => default_path
    }
}

/// Prefers the directory next to the executable, falls back to the working directory.
pub fn get_default_config_path() -> String {
    let default_path = get_exe_path().join(CONFIG_PATH);
    if default_path.is_dir() {
        default_path.to_str().unwrap_or(CONFIG_PATH).to_string()
    } else {
        CONFIG_PATH.to_string()
    }
}

#[inline]
pub fn get_default_config_file_path(config_path: &str) -> String {
    let path = PathBuf::from(config_path).join(CONFIG_FILE);
    path.to_str().map_or_else(|| CONFIG_FILE.to_string(), ToString::to_string)
}

pub fn resolve_directory_path(input: &str) -> String {
    let current_dir = std::env::current_dir().unwrap_or_default();

    if input.is_empty() {
        return String::from(current_dir.to_str().unwrap_or("."));
    }

    let input_path = PathBuf::from(input);
    if !input_path.is_dir() {
        // a missing config directory is allowed, the defaults are used then
        return input.to_string();
    }

    input_path
        .canonicalize()
        .map_or_else(
            |err| {
                error!("Path not found {}: {err}", input_path.display());
                input.to_string()
            },
            |ap| String::from(ap.to_str().unwrap_or(input)),
        )
}

pub fn path_exists(file_path: &Path) -> bool {
    file_path.try_exists().unwrap_or(false)
}

use regex::Regex;
use std::sync::atomic::AtomicBool;
use std::sync::LazyLock;

pub const CONFIG_PATH: &str = "config";
pub const CONFIG_FILE: &str = "config.yml";

pub const CONTENT_TYPE_MP4: &str = "video/mp4";
pub const CONTENT_TYPE_VIDEO_PREFIX: &str = "video/";
pub const CONTENT_TYPE_HLS_MARKER: &str = "mpegurl";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_STREAM_MARKERS: &[&str] = &[".m3u8", ".hls", "stream", ".m3u", ".ts", "cdn"];
pub const DEFAULT_BLOCKED_DOMAINS: &[&str] = &["youtube.com", "vimeo.com", "dailymotion.com"];

pub struct Constants {
    pub re_credentials: Regex,
    pub re_ipv4: Regex,
    pub re_url_userinfo: Regex,
    pub re_env_var: Regex,
    pub sanitize: AtomicBool,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_credentials: Regex::new(r"((username|password|token|key|sign|auth)=)[^&]*").unwrap(),
        re_ipv4: Regex::new(r"\b((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\b").unwrap(),
        re_url_userinfo: Regex::new(r"(?i)(https?://)[^/@\s]+@").unwrap(),
        re_env_var: Regex::new(r"\$\{env:(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)}").unwrap(),
        sanitize: AtomicBool::new(true),
    });

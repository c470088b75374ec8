use crate::utils::{DEFAULT_BLOCKED_DOMAINS, DEFAULT_STREAM_MARKERS, DEFAULT_USER_AGENT};

pub const fn default_as_true() -> bool { true }

pub fn default_host() -> String { String::from("0.0.0.0") }
pub const fn default_port() -> u16 { 5000 }
pub fn default_web_root() -> String { String::from("./web") }

// The preflight target only has to be highly available, its answer is never inspected.
pub fn default_probe_url() -> String { String::from("https://www.baidu.com") }
pub const fn default_probe_timeout_secs() -> u64 { 2 }
pub const fn default_connect_timeout_secs() -> u64 { 10 }
pub const fn default_read_timeout_secs() -> u64 { 10 }
pub const fn default_chunk_size() -> usize { 32 * 1024 }
pub const fn default_cache_max_age_secs() -> u64 { 3600 }
pub fn default_user_agent() -> String { String::from(DEFAULT_USER_AGENT) }

pub fn default_resolver_url() -> String { String::from("https://jx.m3u8.tv/jiexi/") }
pub fn default_resolver_query_param() -> String { String::from("url") }
pub fn default_stream_markers() -> Vec<String> { DEFAULT_STREAM_MARKERS.iter().map(ToString::to_string).collect() }
pub fn default_blocked_domains() -> Vec<String> { DEFAULT_BLOCKED_DOMAINS.iter().map(ToString::to_string).collect() }

pub fn default_room() -> String { String::from("general") }
pub fn default_movie_command() -> String { String::from("@movie") }

pub fn default_servers() -> Vec<String> { vec![String::from("http://127.0.0.1:5000")] }

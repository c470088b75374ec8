pub fn is_blank_optional_str(s: Option<&str>) -> bool {
    s.is_none_or(|s| s.trim().is_empty())
}

pub fn is_blank_optional_string(s: &Option<String>) -> bool {
    is_blank_optional_str(s.as_deref())
}

/// Cuts the string after `max_len` characters and appends `...`.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let mut truncated: String = s.chars().take(max_len).collect();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

use chrono::{DateTime, Local};

pub use crate::requests::http::total_pages;

pub fn format_duration(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = total_seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

pub fn format_play_count(count: u64) -> String {
    if count == 1 {
        "1 view".to_string()
    } else {
        format!("{} views", count)
    }
}

/// RFC 3339 timestamp rendered in the viewer's local time.
pub fn format_played_at(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn progress_percent(progress_seconds: f64, duration_seconds: Option<f64>) -> Option<u8> {
    let duration = duration_seconds.filter(|d| *d > 0.0)?;
    let percent = (progress_seconds.max(0.0) / duration * 100.0).round();
    Some(percent.min(100.0) as u8)
}

pub fn next_slide(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn login_error_message(code: &str) -> &'static str {
    match code {
        "access_denied" => "Sign-in was cancelled at the identity provider.",
        "invalid_state" => "The sign-in session expired. Please start again.",
        "token_exchange_failed" => "The identity provider did not accept the sign-in.",
        "userinfo_failed" => "Your profile could not be read from the identity provider.",
        "user_not_allowed" => "This account is not allowed to use the catalog.",
        "oidc_not_configured" => "Single sign-on is not configured on this server.",
        _ => "Login failed. Please try again.",
    }
}

pub fn truncate_text(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() > max_chars {
        (text.chars().take(max_chars).collect::<String>() + "...", true)
    } else {
        (text.to_string(), false)
    }
}

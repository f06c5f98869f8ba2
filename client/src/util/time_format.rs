//! Timestamp display helpers for bubbles and the conversation sidebar.

#[cfg(test)]
#[path = "time_format_test.rs"]
mod time_format_test;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const INVALID_DATE: &str = "Invalid date";

/// Parse an RFC 3339 timestamp, or a zone-less one taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `HH:MM` in the browser's local zone, or [`INVALID_DATE`].
pub fn format_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

pub fn format_time_in<Tz: TimeZone>(raw: &str, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(zone).format("%H:%M").to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

/// "just now", "5m ago", "3h ago", "2d ago", then a plain date after a week.
pub fn format_relative(raw: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return String::new();
    };
    let seconds = (now - then).num_seconds().max(0);
    match seconds {
        s if s < 60 => "just now".to_owned(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 604_800 => format!("{}d ago", s / 86_400),
        _ => then.with_timezone(&Local).format("%Y-%m-%d").to_string(),
    }
}

/// Current time as an RFC 3339 string, for locally created messages.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

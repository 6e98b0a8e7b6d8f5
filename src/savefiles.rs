use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

// Snapshot folder name for a file modification time
pub fn name_from_system_time(time: SystemTime) -> String {
    format_timestamp(&DateTime::<Local>::from(time))
}

pub fn build_save_name_at<Tz: TimeZone>(time: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let timestamp = format_timestamp(time);
    let message = message.trim();
    if message.is_empty() {
        timestamp
    } else {
        format!("{timestamp} {message}")
    }
}

/// Folder name for a snapshot taken now: `YYYYMMDD-HHMMSS[ message]`.
pub fn build_save_name(message: &str) -> String {
    build_save_name_at(&Local::now(), message)
}

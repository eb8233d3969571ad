//! Human-friendly times and sizes for subtitles

use chrono::{DateTime, Local, TimeZone, Utc};

/// Describe how long ago `timestamp` (unix seconds) was, relative to `now`
///
/// Anything older than 30 days is shown as a local `YYYY-MM-DD` date.
pub fn relative_time(timestamp: i64, now: DateTime<Utc>) -> String {
    let diff = (now.timestamp() - timestamp).max(0);
    match diff {
        0..=59 => format!("{diff}s ago"),
        60..=3599 => format!("{}m ago", diff / 60),
        3600..=86_399 => format!("{}h ago", diff / 3600),
        86_400..=2_591_999 => format!("{}d ago", diff / 86_400),
        _ => Local
            .timestamp_opt(timestamp, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

/// [`relative_time`] against the current clock
pub fn since(timestamp: i64) -> String {
    relative_time(timestamp, Utc::now())
}

/// Format a byte count, e.g. `12.7 KB`
pub fn file_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

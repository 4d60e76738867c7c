//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Local, Utc};

/// Format an optional UTC timestamp in local time, or "N/A".
///
/// # Example output
/// `01/06/2026 14:30`
pub fn format_datetime_local(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%m/%d/%Y %H:%M")
            .to_string(),
        None => "N/A".to_string(),
    }
}

/// Format a remaining duration as `Xh Ym`, or `Ym` under an hour.
pub fn format_remaining(remaining: chrono::Duration) -> String {
    let hours = remaining.num_hours();
    let mins = remaining.num_minutes() % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins.max(0))
    }
}

/// Show an optional field, using "-" when it is empty
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

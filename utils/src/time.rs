//! Time formatting helpers.

use oig_types::Timestamp;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// "in 2h 5m" for a future deadline, "due" once it has passed.
pub fn describe_deadline(deadline: Timestamp, now: Timestamp) -> String {
    if deadline.has_passed(now) {
        "due".to_string()
    } else {
        format!("in {}", format_duration(deadline.secs_until(now)))
    }
}

//! Human-readable durations.

/// `90 -> "1m 30s"`, `60 -> "1m"`, `30 -> "30s"`.
pub fn format_duration(seconds: u64) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    match (m, s) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Clock display: `90 -> "01:30"`, `5 -> "00:05"`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
